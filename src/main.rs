use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cubecam::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "cubecam", about = "Fly a camera around a textured spinning cube")]
struct Cli {
    /// Window title
    #[arg(long, default_value = "cubecam")]
    title: String,

    /// Window width in logical pixels
    #[arg(long, default_value_t = 800)]
    width: u32,

    /// Window height in logical pixels
    #[arg(long, default_value_t = 600)]
    height: u32,

    /// Allow the window to be resized
    #[arg(long)]
    resizable: bool,

    /// Invert vertical mouse look
    #[arg(long)]
    invert_y: bool,

    /// Directory containing vertex.wgsl and fragment.wgsl
    #[arg(long, default_value = "shaders")]
    shader_dir: PathBuf,

    /// Base texture (a checkerboard is generated when omitted)
    #[arg(long)]
    texture: Option<PathBuf>,

    /// Texture mixed over the base texture
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Overlay weight in [0, 1]
    #[arg(long, default_value_t = 0.2)]
    mix: f32,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> AppConfig {
        let mut config = AppConfig::new()
            .title(self.title)
            .size(self.width, self.height)
            .resizable(self.resizable)
            .inverted_y(self.invert_y)
            .shader_dir(self.shader_dir)
            .mix_factor(self.mix);
        if let Some(texture) = self.texture {
            config = config.texture(texture);
        }
        if let Some(overlay) = self.overlay {
            config = config.overlay(overlay);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .init();

    tracing::info!("cubecam starting");

    let config = cli.into_config();
    let shader_dir = config.shader_dir.clone();
    cubecam::run(config)
        .with_context(|| format!("cubecam failed (shaders from {})", shader_dir.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_app_config() {
        let cli = Cli::parse_from(["cubecam"]);
        assert_eq!(cli.into_config(), AppConfig::default());
    }

    #[test]
    fn flags_map_into_config() {
        let cli = Cli::parse_from([
            "cubecam",
            "--width",
            "500",
            "--height",
            "500",
            "--invert-y",
            "--texture",
            "container.jpg",
            "--overlay",
            "face.png",
            "--mix",
            "0.5",
            "--shader-dir",
            "assets",
        ]);
        let config = cli.into_config();
        assert_eq!((config.width, config.height), (500, 500));
        assert!(config.inverted_y);
        assert_eq!(config.texture, Some(PathBuf::from("container.jpg")));
        assert_eq!(config.overlay, Some(PathBuf::from("face.png")));
        assert_eq!(config.mix_factor, 0.5);
        assert_eq!(config.shader_dir, PathBuf::from("assets"));
    }

    #[test]
    fn cli_is_well_formed() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
