// src/config.rs
use crate::aggregate::{AggregateOptions, Aggregator, IssueCatalog};
use crate::analyzer::{Analyzer, AnalyzerOptions};
use crate::classify::{Boundary, Classifier, DEFAULT_THRESHOLD};
use crate::error::{EngineError, Result as EngineResult};
use crate::lexicon::Lexicon;
use crate::scoring::{Modifiers, PolicyKind};
use crate::text::Tokenization;
use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

pub const ENV_PATH: &str = "CARESENSE_CONFIG_PATH";
const DEFAULT_TOML: &str = "config/caresense.toml";
const DEFAULT_JSON: &str = "config/caresense.json";

/// Engine settings. Every field is optional in the file; omitted ones take
/// the canonical profile's values.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub policy: PolicyKind,
    pub tokenization: Tokenization,
    pub drop_stopwords: bool,
    pub boundary: Boundary,
    pub threshold: f64,
    /// JSON object of `token: polarity`; the built-in tiny lexicon when absent.
    pub lexicon_path: Option<PathBuf>,
    pub modifiers: Option<Modifiers>,
    pub issues: Option<IssueCatalog>,
    pub row_cap: Option<usize>,
    pub top_regions: usize,
    pub top_terms: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let agg = AggregateOptions::default();
        Self {
            policy: PolicyKind::default(),
            tokenization: Tokenization::default(),
            drop_stopwords: true,
            boundary: Boundary::default(),
            threshold: DEFAULT_THRESHOLD,
            lexicon_path: None,
            modifiers: None,
            issues: None,
            row_cap: agg.row_cap,
            top_regions: agg.top_regions,
            top_terms: agg.top_terms,
        }
    }
}

impl EngineConfig {
    /// Load from an explicit path. `.toml` / `.json` by extension, otherwise
    /// TOML then JSON.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading engine config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, &ext)
            .with_context(|| format!("parsing engine config {}", path.display()))?;
        info!(path = %path.display(), policy = ?cfg.policy, "engine config loaded");
        Ok(cfg)
    }

    /// Resolve the config file:
    /// 1) $CARESENSE_CONFIG_PATH
    /// 2) config/caresense.toml
    /// 3) config/caresense.json
    /// 4) built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Ok(p) = std::env::var(ENV_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!(
                "{ENV_PATH} points to non-existent path {}",
                pb.display()
            ));
        }
        for candidate in [DEFAULT_TOML, DEFAULT_JSON] {
            let pb = PathBuf::from(candidate);
            if pb.exists() {
                return Self::load_from(&pb);
            }
        }
        warn!("no engine config found; using built-in defaults");
        Ok(Self::default())
    }

    pub fn classifier(&self) -> EngineResult<Classifier> {
        Classifier::new(self.threshold, self.boundary)
    }

    pub fn aggregate_options(&self) -> AggregateOptions {
        AggregateOptions {
            row_cap: self.row_cap,
            top_regions: self.top_regions,
            top_terms: self.top_terms,
        }
    }

    pub fn analyzer_options(&self) -> EngineResult<AnalyzerOptions> {
        let modifiers = self.modifiers.clone().unwrap_or_default();
        Ok(AnalyzerOptions {
            tokenization: self.tokenization,
            drop_stopwords: self.drop_stopwords,
            policy: self.policy.build(modifiers),
            classifier: self.classifier()?,
        })
    }

    pub fn load_lexicon(&self) -> EngineResult<Lexicon> {
        match &self.lexicon_path {
            Some(p) => {
                let lx = Lexicon::load_from_file(p)?;
                if lx.is_empty() {
                    return Err(EngineError::Config(format!(
                        "lexicon {} has no entries",
                        p.display()
                    )));
                }
                info!(path = %p.display(), entries = lx.len(), "lexicon loaded");
                Ok(lx)
            }
            None => Ok(Lexicon::tiny()),
        }
    }

    pub fn build_analyzer(&self) -> EngineResult<Analyzer> {
        let lexicon = Arc::new(self.load_lexicon()?);
        Ok(Analyzer::new(lexicon, self.analyzer_options()?))
    }

    pub fn build_aggregator(&self) -> EngineResult<Aggregator> {
        Ok(Aggregator::new(
            self.build_analyzer()?,
            self.issues.clone().unwrap_or_default(),
            self.aggregate_options(),
        ))
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<EngineConfig> {
    match hint_ext {
        "toml" => Ok(toml::from_str(s)?),
        "json" => Ok(serde_json::from_str(s)?),
        _ => toml::from_str(s)
            .map_err(anyhow::Error::from)
            .or_else(|_| serde_json::from_str(s).map_err(anyhow::Error::from))
            .map_err(|_| anyhow!("unsupported engine config format")),
    }
}
