//! pathchain: transmission-path parsing for announcement analysis
//!
//! The announcement analysis service describes how an event propagates to a
//! company's results as free-form text ("A → B → C（理由）"), one chain per
//! line. This crate turns that text into structured chains and renders them.
//!
//! # Core Concepts
//!
//! - **Chain**: one causal line, split on `→` or `->` into steps
//! - **Result node**: a step that is last, or mentions an outcome keyword
//! - **Reason**: the first parenthetical of the line
//!
//! # Example
//!
//! ```
//! use pathchain::parse_multiple_chains;
//!
//! let chains = parse_multiple_chains("公司签订合同 → 提升产能 → 带动业绩增长");
//! assert_eq!(chains.len(), 1);
//! assert!(chains[0].steps[1].is_result);
//! ```

pub mod analysis;
pub mod chain;
pub mod config;
pub mod render;

pub use analysis::{load_response, AnalysisError, AnalysisResponse, EventType, Sentiment};
pub use chain::{
    parse_chain_text, parse_multiple_chains, ChainParser, ChainStep, ParsedChain, ResultKeywords,
};
pub use config::{ConfigError, ParserConfig};
pub use render::{render_chain, render_chains, render_report, OutputFormat};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
