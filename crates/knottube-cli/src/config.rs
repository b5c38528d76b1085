//! Configuration file loading and command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use knottube_curve::CurveParameters;
use knottube_sweep::{DegeneracyPolicy, SweepOptions};
use serde::{Deserialize, Serialize};

/// Contents of a `.toml` configuration file.
///
/// ```toml
/// degeneracy = "reuse-previous"
///
/// [curve]
/// q = 5
/// n = 200
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub degeneracy: DegeneracyPolicy,
    pub curve: CurveParameters,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn sweep_options(&self) -> SweepOptions {
        SweepOptions {
            degeneracy: self.degeneracy,
            ..Default::default()
        }
    }
}

/// Curve parameter flags. Each one overrides the config file value.
#[derive(Args, Debug, Clone, Default)]
pub struct CurveArgs {
    /// Distance from the origin to the sweep circle
    #[arg(short = 'a', long, global = true, allow_negative_numbers = true)]
    pub a: Option<f64>,
    /// Radius of the secondary winding
    #[arg(short = 'b', long, global = true)]
    pub b: Option<f64>,
    /// Windings around the z axis
    #[arg(short = 'p', long, global = true, allow_negative_numbers = true)]
    pub p: Option<i32>,
    /// Windings around the sweep circle
    #[arg(short = 'q', long, global = true, allow_negative_numbers = true)]
    pub q: Option<i32>,
    /// Tube radius
    #[arg(short = 'r', long, global = true)]
    pub r: Option<f64>,
    /// Samples along the spine
    #[arg(short = 'n', long, global = true)]
    pub n: Option<u32>,
    /// Samples around each cross-section
    #[arg(short = 'm', long, global = true)]
    pub m: Option<u32>,
    /// Carry the previous frame across degenerate samples instead of failing
    #[arg(long, global = true)]
    pub reuse_degenerate: bool,
}

impl CurveArgs {
    pub fn apply(&self, config: &mut Config) {
        let curve = &mut config.curve;
        if let Some(a) = self.a {
            curve.a = a;
        }
        if let Some(b) = self.b {
            curve.b = b;
        }
        if let Some(p) = self.p {
            curve.p = p;
        }
        if let Some(q) = self.q {
            curve.q = q;
        }
        if let Some(r) = self.r {
            curve.r = r;
        }
        if let Some(n) = self.n {
            curve.n = n;
        }
        if let Some(m) = self.m {
            curve.m = m;
        }
        if self.reuse_degenerate {
            config.degeneracy = DegeneracyPolicy::ReusePrevious;
        }
    }
}

/// Resolve the effective configuration: defaults, then file, then flags.
pub fn resolve(path: Option<&Path>, args: &CurveArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    args.apply(&mut config);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file() {
        let mut config: Config = toml::from_str("[curve]\nq = 5\nn = 64\n").unwrap();
        let args = CurveArgs {
            n: Some(12),
            r: Some(3.5),
            ..Default::default()
        };
        args.apply(&mut config);
        assert_eq!(config.curve.q, 5);
        assert_eq!(config.curve.n, 12);
        assert_eq!(config.curve.r, 3.5);
        assert_eq!(config.curve.a, 100.0);
        assert_eq!(config.degeneracy, DegeneracyPolicy::Error);
    }

    #[test]
    fn test_degeneracy_from_file() {
        let config: Config = toml::from_str("degeneracy = \"reuse-previous\"\n").unwrap();
        assert_eq!(config.degeneracy, DegeneracyPolicy::ReusePrevious);
        assert_eq!(config.sweep_options().degeneracy, DegeneracyPolicy::ReusePrevious);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(toml::from_str::<Config>("zoom = 3\n").is_err());
    }

    #[test]
    fn test_resolve_without_file() {
        let config = resolve(None, &CurveArgs::default()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let back: Config = toml::from_str(&text).unwrap();
        assert_eq!(config, back);
    }
}
