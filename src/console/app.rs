use super::{emit, key_to_command, Command, ConsoleGuard};
use crate::account::AccountManager;
use crate::catalog::{
    media, schedule, CommercialItem, MediaCategory, MediaItem, Registry, ScheduleEntry, Sponsor,
};
use crate::config::{Config, Theme};
use crate::player::{Channel, ConsoleSurface, PlaybackState, PlayerEvent, Source, StationPlayer};
use crate::store::{slots, StateStore};
use anyhow::Result;
use chrono::Local;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{self, Instant};
use tracing::warn;

/// The running station: registries, channel state and the player, driven
/// by single-key commands and the simulated end-of-item signal.
pub struct App {
    config: Config,
    store: StateStore,
    library: Registry<MediaItem>,
    commercials: Registry<CommercialItem>,
    schedule: Registry<ScheduleEntry>,
    sponsors: Registry<Sponsor>,
    account: AccountManager,
    channel: Channel,
    player: StationPlayer,
    player_events: mpsc::UnboundedReceiver<PlayerEvent>,
    theme: Theme,
    library_filter: Option<MediaCategory>,
    /// When the current auto item "finishes" - the terminal stand-in for
    /// the video element's ended signal. Live streams never set it.
    end_deadline: Option<Instant>,
    paused_remaining: Option<Duration>,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Result<Self> {
        let store = StateStore::open(config.data_dir.clone())?;

        let library = Registry::load(store.clone(), slots::VIDEOS, media::default_media_items);
        let commercials =
            Registry::load(store.clone(), slots::COMMERCIALS, media::default_commercials);
        let schedule =
            Registry::load(store.clone(), slots::SCHEDULE, schedule::default_schedule);
        let sponsors = Registry::load(
            store.clone(),
            slots::SPONSORS,
            crate::catalog::sponsor::default_sponsors,
        );
        let account = AccountManager::load(store.clone());
        let theme = store.load_or(slots::THEME, Theme::default);

        let rotation = media::auto_rotation(library.list());
        let channel = Channel::new(config.live.hls_url.clone(), rotation);

        let mut player = StationPlayer::new(Box::new(ConsoleSurface::default()));
        let (event_tx, player_events) = mpsc::unbounded_channel();
        player.set_event_sender(event_tx);

        Ok(Self {
            config,
            store,
            library,
            commercials,
            schedule,
            sponsors,
            account,
            channel,
            player,
            player_events,
            theme,
            library_filter: None,
            end_deadline: None,
            paused_remaining: None,
            should_quit: false,
        })
    }

    /// Start with live mode already switched on (the --live flag).
    pub fn set_live(&mut self, on: bool) {
        self.channel.set_live_enabled(on);
    }

    pub async fn run(&mut self) -> Result<()> {
        let _guard = ConsoleGuard::new()?;
        self.print_banner();
        self.retune();

        let mut keys = EventStream::new();
        while !self.should_quit {
            tokio::select! {
                maybe_event = keys.next() => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            if let Some(command) = key_to_command(key) {
                                self.handle_command(command);
                            }
                        }
                        Some(Ok(_)) => {}
                        Some(Err(e)) => warn!("terminal event error: {}", e),
                        None => break,
                    }
                }
                Some(event) = self.player_events.recv() => {
                    self.handle_player_event(event);
                }
                _ = wait_for(self.end_deadline) => {
                    self.on_item_ended();
                }
            }
        }
        Ok(())
    }

    fn handle_command(&mut self, command: Command) {
        match command {
            Command::Quit => self.should_quit = true,
            Command::TogglePlayPause => self.toggle_play_pause(),
            Command::ToggleLive => {
                let on = !self.channel.live_enabled();
                self.channel.set_live_enabled(on);
                emit(if on { "Ao vivo: LIGADO" } else { "Ao vivo: desligado" });
                self.retune();
            }
            Command::NextItem => {
                emit("⏭ pulando para o próximo item");
                self.on_item_ended();
            }
            Command::ShowGrid => self.show_grid(),
            Command::ShowUpcoming => self.show_upcoming(),
            Command::ShowLibrary => self.show_library(),
            Command::CycleLibraryFilter => {
                self.library_filter = match self.library_filter {
                    None => Some(MediaCategory::Music),
                    Some(MediaCategory::Music) => Some(MediaCategory::News),
                    Some(MediaCategory::News) => Some(MediaCategory::Ad),
                    Some(MediaCategory::Ad) => None,
                };
                let label = self
                    .library_filter
                    .map_or("todos", |c| c.label());
                emit(&format!("Filtro da biblioteca: {}", label));
            }
            Command::ShowSponsors => self.show_sponsors(),
            Command::ShowIngest => self.show_ingest(),
            Command::ShowAccount => self.show_account(),
            Command::Login => {
                self.account.login("");
                if let Some(user) = self.account.user() {
                    emit(&format!("Bem-vindo, {}!", user.name));
                }
            }
            Command::Logout => {
                self.account.logout();
                emit("Sessão encerrada.");
            }
            Command::ToggleFavorite => self.toggle_favorite(),
            Command::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = self.store.save(slots::THEME, &self.theme) {
                    warn!("could not persist theme: {}", e);
                }
                emit(&format!("Tema: {}", self.theme.label()));
            }
            Command::EnableNotifications => self.enable_notifications(),
            Command::Help => self.print_help(),
        }
    }

    fn toggle_play_pause(&mut self) {
        let was_playing = self.player.state() == PlaybackState::Playing;
        self.player.toggle_play_pause();

        if was_playing {
            // freeze the countdown with the item
            if let Some(at) = self.end_deadline.take() {
                self.paused_remaining = Some(at.duration_since(Instant::now()));
            }
        } else if self.player.state() == PlaybackState::Playing {
            if let Some(remaining) = self.paused_remaining.take() {
                self.end_deadline = Some(Instant::now() + remaining);
            } else if self.end_deadline.is_none() {
                self.arm_end_timer();
            }
        }
    }

    fn toggle_favorite(&mut self) {
        let Some(id) = self.channel.current_item().map(|item| item.id.clone()) else {
            emit("Nada para favoritar agora (modo ao vivo ou canal parado).");
            return;
        };
        if self.account.toggle_favorite(&id) {
            emit("⭐ adicionado aos favoritos");
        } else {
            emit("removido dos favoritos");
        }
    }

    /// Re-run source selection and reload the player when the answer
    /// changed. Selection is pure, so this is safe to call after any
    /// input flips.
    fn retune(&mut self) {
        let selection = self.channel.current_source();
        let unchanged = selection.as_ref() == self.player.current_source()
            && self.player.state() != PlaybackState::Stopped;
        let already_idle = selection.is_none() && self.player.current_source().is_none();

        if !unchanged && !already_idle {
            self.player.load(selection);
        }
        self.arm_end_timer();
    }

    fn arm_end_timer(&mut self) {
        self.paused_remaining = None;
        self.end_deadline = match (self.player.state(), self.channel.current_item()) {
            (PlaybackState::Playing, Some(item)) if item.duration > 0 => {
                Some(Instant::now() + Duration::from_secs(item.duration))
            }
            _ => None,
        };
    }

    fn on_item_ended(&mut self) {
        self.end_deadline = None;
        self.player.notify_ended();
        self.channel.handle_ended();
        self.retune();
    }

    fn handle_player_event(&mut self, event: PlayerEvent) {
        match event {
            PlayerEvent::SourceStarted(Source::Live { url }) => {
                emit(&format!("🔴 AO VIVO • {}", url));
            }
            PlayerEvent::SourceStarted(Source::Auto { title, .. }) => {
                emit(&format!("▶ Auto VJ • {}", title));
            }
            PlayerEvent::AutoplayBlocked(_) => {
                emit("⏸ reprodução não começou sozinha - pressione espaço");
            }
            PlayerEvent::PlaybackPaused => emit("⏸ Pausado"),
            PlayerEvent::PlaybackResumed => emit("▶ Reproduzindo"),
            PlayerEvent::SourceEnded(Source::Auto { title, .. }) => {
                emit(&format!("fim de: {}", title));
            }
            PlayerEvent::PlaybackStopped | PlayerEvent::SourceEnded(_) => {}
        }
    }

    fn print_banner(&self) {
        emit(&format!(
            "📺 {} — {}",
            self.config.station.name, self.config.station.tagline
        ));
        emit(&format!("Tema {} • 'h' mostra os comandos, 'q' sai", self.theme.label()));
        emit("");
    }

    fn print_help(&self) {
        emit("Comandos:");
        emit("  espaço  play/pause          l  ao vivo liga/desliga");
        emit("  n  próximo item             f  favoritar item atual");
        emit("  g  grade 24h                u  próximos programas");
        emit("  v  biblioteca               c  filtro da biblioteca");
        emit("  s  patrocinadores           r  ingest (OBS)");
        emit("  a  conta                    i/o  entrar/sair");
        emit("  t  tema                     b  notificações");
        emit("  q  sair");
    }

    fn show_grid(&self) {
        emit("📅 Grade de Programação");
        for hour in schedule::grid_hours() {
            match schedule::entry_at(self.schedule.list(), &hour) {
                Some(entry) => {
                    let playlist: Vec<String> = entry
                        .playlist
                        .iter()
                        .map(|id| {
                            self.library
                                .get(id)
                                .map(|v| v.title.clone())
                                .unwrap_or_else(|| id.clone())
                        })
                        .collect();
                    emit(&format!(
                        "  {}  {} ({} – {})  [{}]",
                        hour,
                        entry.title,
                        entry.start,
                        entry.end,
                        playlist.join(", ")
                    ));
                }
                None => emit(&format!("  {}  —", hour)),
            }
        }
    }

    fn show_upcoming(&self) {
        emit("⏰ Próximos Programas");
        let now = Local::now().time();
        let next = schedule::upcoming(self.schedule.list(), now, self.config.ui.upcoming_limit);
        if next.is_empty() {
            emit("  Sem itens programados para hoje.");
            return;
        }
        for entry in next {
            emit(&format!("  {} • {}  {}", entry.start, entry.end, entry.title));
        }
    }

    fn show_library(&self) {
        let filter_label = self.library_filter.map_or("todos", |c| c.label());
        emit(&format!("🎞 Biblioteca ({})", filter_label));
        let items = media::search(self.library.list(), "", self.library_filter);
        if items.is_empty() {
            emit("  Nenhum item encontrado.");
            return;
        }
        for item in items {
            let duration = if item.duration > 0 {
                format!("{}s", item.duration)
            } else {
                "?".to_string()
            };
            let mut line = format!("  {} • {} • {}", item.title, item.category.label(), duration);
            if item.sponsored {
                line.push_str(" • Patrocinado");
            }
            if self.account.favorites().iter().any(|f| f == &item.id) {
                line.push_str(" ⭐");
            }
            emit(&line);
            emit(&format!("      {}", item.url));
        }
    }

    fn show_sponsors(&self) {
        emit("⭐ Patrocinadores");
        for sponsor in self.sponsors.list() {
            emit(&format!("  {} — {}", sponsor.name, sponsor.message));
            emit(&format!("      {}", sponsor.link));
        }
        if !self.commercials.is_empty() {
            emit("📣 Comerciais");
            for spot in self.commercials.list() {
                emit(&format!(
                    "  {} ({}s) • {}",
                    spot.title, spot.duration, spot.sponsor
                ));
            }
        }
    }

    fn show_ingest(&self) {
        emit("📡 Configurar Live (OBS)");
        emit(&format!(
            "  OBS → Servidor: {} • Chave: {}",
            self.config.live.rtmp_server, self.config.live.rtmp_key
        ));
        match &self.config.live.hls_url {
            Some(url) => emit(&format!("  Player HLS: {}", url)),
            None => emit("  Player HLS: (não configurado)"),
        }
        emit("  Gere HLS a partir do RTMP (ex.: Nginx-RTMP); o player usa a URL .m3u8.");
    }

    fn show_account(&self) {
        match self.account.user() {
            Some(user) => {
                emit("👤 Perfil do Assinante");
                emit(&format!("  Nome: {}", user.name));
                emit(&format!("  Email: {}", user.email));
                emit(&format!("  Plano: {}", user.plan));
                emit(&format!("  Favoritos: {}", self.account.favorites().len()));
                self.show_plans();
            }
            None => emit("Você não está logado - pressione 'i' para entrar."),
        }
    }

    #[cfg(feature = "billing")]
    fn show_plans(&self) {
        let gateway = crate::billing::BillingGateway::new();
        emit("  Planos (demo):");
        for plan in gateway.plans() {
            emit(&format!("    {} – {}", plan.name, plan.price_label()));
        }
    }

    #[cfg(not(feature = "billing"))]
    fn show_plans(&self) {}

    #[cfg(feature = "notify")]
    fn enable_notifications(&mut self) {
        if !self.config.ui.show_notifications {
            emit("Notificações desativadas na configuração.");
            return;
        }
        match self.account.enable_notifications() {
            Ok(()) => emit("Notificações ativadas!"),
            Err(e) => {
                warn!("notification request failed: {}", e);
                emit("Não foi possível ativar as notificações.");
            }
        }
    }

    #[cfg(not(feature = "notify"))]
    fn enable_notifications(&mut self) {
        // single alert, mirroring the capability check in the web build
        emit("Este build não suporta notificações.");
    }
}

async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(at) => time::sleep_until(at).await,
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn app(dir: &TempDir) -> App {
        let mut config = Config::default();
        config.data_dir = dir.path().to_path_buf();
        App::new(config).expect("app builds")
    }

    #[test]
    fn rotation_cycles_through_completions() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.retune();

        // seed rotation is v1, v2 (the commercial stays out)
        let first = app.player.current_source().unwrap().url().to_string();
        assert!(first.contains("x36xhzz"));
        assert!(app.player.session_url().is_some());

        app.on_item_ended();
        let second = app.player.current_source().unwrap().url().to_string();
        assert!(second.contains("pts-lv"));

        app.on_item_ended();
        let third = app.player.current_source().unwrap().url().to_string();
        assert_eq!(third, first);
    }

    #[test]
    fn live_toggle_overrides_the_rotation() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.retune();

        app.handle_command(Command::ToggleLive);
        match app.player.current_source() {
            Some(Source::Live { url }) => {
                assert_eq!(url, &Config::default().live.hls_url.unwrap())
            }
            other => panic!("expected live source, got {:?}", other),
        }
        // live sources never arm the simulated end timer
        assert!(app.end_deadline.is_none());

        app.handle_command(Command::ToggleLive);
        assert!(matches!(
            app.player.current_source(),
            Some(Source::Auto { .. })
        ));
    }

    #[test]
    fn pausing_freezes_the_end_countdown() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.retune();
        assert!(app.end_deadline.is_some());

        app.handle_command(Command::TogglePlayPause);
        assert_eq!(app.player.state(), PlaybackState::Paused);
        assert!(app.end_deadline.is_none());
        assert!(app.paused_remaining.is_some());

        app.handle_command(Command::TogglePlayPause);
        assert_eq!(app.player.state(), PlaybackState::Playing);
        assert!(app.end_deadline.is_some());
    }

    #[test]
    fn favoriting_follows_the_current_auto_item() {
        let dir = TempDir::new().unwrap();
        let mut app = app(&dir);
        app.retune();

        app.handle_command(Command::ToggleFavorite);
        assert_eq!(app.account.favorites(), ["v1".to_string()]);

        app.handle_command(Command::ToggleFavorite);
        assert!(app.account.favorites().is_empty());
    }
}
