use super::Parser;

#[derive(Parser, Debug)]
#[command(name = "minimal-sns", about = "Friend graph HTTP service")]
pub struct Cli {
    /// Path to a TOML settings file.
    #[arg(long)]
    pub settings: Option<String>,
}
