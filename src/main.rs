use anyhow::Result;

use revsol::game::Game;
use revsol::renderer::CliRenderer;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    println!(
        r#"
┌─────────────────────────────────────────┐
│   Reverse Klondike (CLI Edition)        │
│   Type 'help' or '?' for commands.      │
└─────────────────────────────────────────┘
"#
    );

    // Parse optional seed from command-line arguments for reproducible games.
    let seed: Option<u64> = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok());

    let renderer = CliRenderer::new();
    let mut game = Game::init(seed, renderer);
    game.run()?;
    Ok(())
}
