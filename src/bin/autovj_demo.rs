use ondatv::catalog::{media, MediaCategory, MediaDraft, Registry};
use ondatv::player::{Channel, ConsoleSurface, PlaybackState, Source, StationPlayer};
use ondatv::store::{slots, StateStore};
use ondatv::MediaItem;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    println!("📺 Auto VJ Demo Utility");
    println!("=======================");

    // Data dir from args or a scratch dir under /tmp
    let data_dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::temp_dir().join("ondatv-demo"));

    println!("📁 Using data dir: {}", data_dir.display());
    let store = StateStore::open(data_dir)?;

    // Seed (or reload) the library through the registry
    let mut library: Registry<MediaItem> =
        Registry::load(store.clone(), slots::VIDEOS, media::default_media_items);
    println!("🎞 Library: {} items", library.len());

    // Exercise the upload form path: validated draft in, edit, remove
    let draft = MediaDraft {
        title: "Clipe de Teste".to_string(),
        url: "https://test-streams.mux.dev/demo/clipe.mp4".to_string(),
        category: MediaCategory::Music,
        sponsored: false,
        duration: 15,
    };
    let added = draft.build()?;
    let added_id = added.id.clone();
    library.add(added);

    if let Some(mut edited) = library.get(&added_id).cloned() {
        edited.title = "Clipe de Teste (editado)".to_string();
        library.update(edited);
    }
    println!("✏️  Added and edited a library item ({} total)", library.len());
    library.remove(&added_id);
    println!("🗑  Removed it again ({} total)", library.len());

    let rotation = media::auto_rotation(library.list());
    println!("🔁 Rotation size: {}", rotation.len());
    println!();

    let mut channel = Channel::new(
        Some("https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8".to_string()),
        rotation,
    );
    let mut player = StationPlayer::new(Box::new(ConsoleSurface::default()));

    // One full lap around the rotation plus one, to show the cycle closing
    println!("▶ Auto VJ rotation:");
    let laps = channel.rotation().len() + 1;
    for step in 0..laps {
        player.load(channel.current_source());
        match player.current_source() {
            Some(Source::Auto { title, url }) => {
                println!("  {}. {} ({})", step + 1, title, url);
            }
            other => println!("  {}. unexpected source: {:?}", step + 1, other),
        }
        player.notify_ended();
        channel.handle_ended();
    }
    println!();

    // Flip live on: the rotation no longer matters
    println!("🔴 Switching live on:");
    channel.set_live_enabled(true);
    player.load(channel.current_source());
    match player.current_source() {
        Some(Source::Live { url }) => println!("  AO VIVO • {}", url),
        other => println!("  unexpected source: {:?}", other),
    }
    println!(
        "  adaptive session: {}",
        player.session_url().unwrap_or("(none)")
    );
    assert_eq!(player.state(), PlaybackState::Playing);

    // Completion signals leave a live channel alone
    player.notify_ended();
    let moved = channel.handle_ended();
    println!("  cursor moved on live ended? {}", moved);

    println!();
    println!("✨ Done");
    Ok(())
}
