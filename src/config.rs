use clap::Parser;

/// Halftime momentum dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "halftime-momentum", version, about)]
pub struct Config {
    /// Dashboard listen address
    #[arg(long, env = "DASHBOARD_ADDR", default_value = "0.0.0.0:8080")]
    pub dashboard_addr: String,

    /// RNG seed for the synthetic dataset (omit for a fresh draw each run)
    #[arg(long, env = "SEED")]
    pub seed: Option<u64>,

    /// Synthetic observations generated per roster player
    #[arg(long, env = "ROWS_PER_PLAYER", default_value = "20")]
    pub rows_per_player: usize,

    /// First-half point total above which the win override can trigger
    /// (strictly greater-than; a row exactly at the threshold is untouched)
    #[arg(long, env = "BOOST_THRESHOLD", default_value = "18.0")]
    pub boost_threshold: f64,

    /// Probability that a qualifying row is forced to a win
    #[arg(long, env = "BOOST_PROBABILITY", default_value = "0.8")]
    pub boost_probability: f64,
}

impl Config {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.rows_per_player == 0 {
            anyhow::bail!("rows_per_player must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.boost_probability) {
            anyhow::bail!("boost_probability must be between 0.0 and 1.0");
        }
        if !self.boost_threshold.is_finite() {
            anyhow::bail!("boost_threshold must be a finite number");
        }
        Ok(())
    }
}
