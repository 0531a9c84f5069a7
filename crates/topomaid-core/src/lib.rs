#![forbid(unsafe_code)]

//! Kafka Streams topology descriptions -> Mermaid flowcharts (headless).
//!
//! Feeds the textual dump produced by `Topology#describe()` through an ordered set of line
//! classifiers and assembles a `graph TD` document: one subgraph block per sub-topology (each
//! tinted with its own pastel fill), edges for topics, state stores, and intra-topology
//! streams, and bare declaration lines so every referenced topic and store renders as a node.
//!
//! Design goals:
//! - best-effort classification: unrecognized lines are skipped, never an error
//! - deterministic, testable outputs (see [`ColorStrategy::Sequential`])
//! - per-call state only; translations never contaminate each other
//!
//! ```
//! use topomaid_core::to_mermaid;
//!
//! let diagram = to_mermaid("Source: KSTREAM-SOURCE-0000000000 (topics: [input-topic])")?;
//! assert!(diagram.starts_with("graph TD"));
//! assert!(diagram.contains("input-topic[input-topic]"));
//! # Ok::<(), topomaid_core::Error>(())
//! ```

pub mod classify;
pub mod error;
pub mod mermaid;
pub mod palette;

pub use classify::{Classifier, ClassifierRegistry, TranslationState};
pub use error::{Error, Result};
pub use palette::{ColorPicker, ColorStrategy, PASTEL_PALETTE};

use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslateOptions {
    pub color_strategy: ColorStrategy,
}

impl TranslateOptions {
    /// Random sub-topology colors (the default).
    pub fn random() -> Self {
        Self {
            color_strategy: ColorStrategy::Random,
        }
    }

    /// Palette-order sub-topology colors; byte-identical output for identical input.
    pub fn sequential() -> Self {
        Self {
            color_strategy: ColorStrategy::Sequential,
        }
    }
}

/// Result of one translation call.
#[derive(Debug, Clone, Serialize)]
pub struct TranslatedTopology {
    /// Sub-topology identifiers in first-seen order.
    #[serde(rename = "subTopologies")]
    pub sub_topologies: Vec<String>,
    /// The Mermaid flowchart document.
    #[serde(rename = "mermaid")]
    pub diagram: String,
}

#[derive(Debug, Clone)]
pub struct Engine {
    registry: ClassifierRegistry,
    options: TranslateOptions,
}

impl Default for Engine {
    fn default() -> Self {
        Self {
            registry: ClassifierRegistry::default_topology(),
            options: TranslateOptions::default(),
        }
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: TranslateOptions) -> Self {
        self.options = options;
        self
    }

    pub fn registry(&self) -> &ClassifierRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ClassifierRegistry {
        &mut self.registry
    }

    /// Translates one topology description into a Mermaid flowchart.
    ///
    /// Every call owns a fresh [`TranslationState`] (accumulators, node tracking, color
    /// picker). The only failure mode is palette exhaustion: a 21st sub-topology in a single
    /// description fails the whole call, with no partial output.
    pub fn translate(&self, topology: &str) -> Result<TranslatedTopology> {
        let mut state = TranslationState::new(self.options.color_strategy);

        for line in topology.lines() {
            if let Some(id) = self.registry.dispatch(line, &mut state)? {
                tracing::trace!(classifier = id, line, "classified line");
            }
        }
        state.close_last_block();

        let diagram = mermaid::assemble(&state);
        tracing::debug!(
            sub_topologies = state.sub_topologies.len(),
            bytes = diagram.len(),
            "translated topology\n{diagram}"
        );

        Ok(TranslatedTopology {
            sub_topologies: state.sub_topologies,
            diagram,
        })
    }
}

/// One-shot translation with default options; returns just the diagram text.
pub fn to_mermaid(topology: &str) -> Result<String> {
    Engine::new().translate(topology).map(|t| t.diagram)
}
