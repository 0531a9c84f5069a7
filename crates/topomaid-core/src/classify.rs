//! Line classifiers for topology description dumps.
//!
//! A [`ClassifierRegistry`] holds an ordered list of `(pattern, handler)` pairs; the first
//! pattern that matches a line wins and its handler mutates the [`TranslationState`]. Lines
//! matching no classifier are ignored, which keeps the translator tolerant of banner lines
//! (`Topologies:`), `<-- upstream` continuations, and whatever else a describe dump carries.

use crate::error::Result;
use crate::mermaid;
use crate::palette::{ColorPicker, ColorStrategy};
use regex::{Captures, Regex};

/// Everything one translation call mutates: the accumulator record plus the name of the node
/// most recently introduced by a Source/Processor/Sink line. Created fresh per call, so no
/// state leaks across translations.
#[derive(Debug)]
pub struct TranslationState {
    /// Node most recently introduced; the attribution target for `-->` continuation lines.
    pub current_node: String,
    pub colors: ColorPicker,
    /// Edges connecting topics and stores to processing nodes.
    pub outside: Vec<String>,
    /// Subgraph open/close markers interleaved with intra-topology edges.
    pub blocks: Vec<String>,
    /// Sub-topology identifiers in first-seen order (repeats kept).
    pub sub_topologies: Vec<String>,
    /// Bare declarations, one push per reference.
    pub topic_sources: Vec<String>,
    pub topic_sinks: Vec<String>,
    pub state_stores: Vec<String>,
    pub class_assignments: Vec<String>,
    pub class_definitions: Vec<String>,
    opened_blocks: usize,
}

impl TranslationState {
    pub fn new(strategy: ColorStrategy) -> Self {
        Self {
            current_node: String::new(),
            colors: ColorPicker::new(strategy),
            outside: Vec::new(),
            blocks: Vec::new(),
            sub_topologies: Vec::new(),
            topic_sources: Vec::new(),
            topic_sinks: Vec::new(),
            state_stores: Vec::new(),
            class_assignments: Vec::new(),
            class_definitions: Vec::new(),
            opened_blocks: 0,
        }
    }

    /// Opens a subgraph block, closing the previous one first.
    ///
    /// Whether a block is open is tracked explicitly rather than inferred from `blocks` being
    /// non-empty: a stray `-->` edge landing in `blocks` before the first boundary line must
    /// not trigger a close marker for a block that was never opened.
    fn open_block(&mut self, sub_topology: &str) {
        if self.opened_blocks > 0 {
            self.blocks.push(mermaid::SUBGRAPH_CLOSE.to_string());
        }
        self.blocks.push(mermaid::subgraph_open(sub_topology));
        self.opened_blocks += 1;
    }

    /// Appends the final close marker if any block was ever opened. Called once, after the
    /// line loop.
    pub fn close_last_block(&mut self) {
        if self.opened_blocks > 0 {
            self.blocks.push(mermaid::SUBGRAPH_CLOSE.to_string());
        }
    }
}

pub type HandlerFn = fn(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()>;

#[derive(Debug, Clone)]
pub struct Classifier {
    pub id: &'static str,
    pattern: Regex,
    handler: HandlerFn,
}

#[derive(Debug, Clone)]
pub struct ClassifierRegistry {
    classifiers: Vec<Classifier>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self {
            classifiers: Vec::new(),
        }
    }

    pub fn add(&mut self, id: &'static str, pattern: &str, handler: HandlerFn) {
        self.classifiers.push(Classifier {
            id,
            pattern: Regex::new(pattern).expect("valid classifier pattern"),
            handler,
        });
    }

    /// The standard topology-describe classifiers.
    ///
    /// Registration order is the dispatch priority and is significant: a `Source:` line also
    /// contains no `-->`, but keeping the boundary/node classifiers ahead of the arrow
    /// classifier makes the policy explicit instead of incidental.
    pub fn default_topology() -> Self {
        let mut reg = Self::new();
        reg.add("sub-topology", r"Sub-topology: ([0-9]*)", visit_sub_topology);
        reg.add("source", r"Source:\s+(\S+)\s+\(topics:\s+\[(.*)\]\)", visit_source);
        reg.add(
            "processor",
            r"Processor:\s+(\S+)\s+\(stores:\s+\[(.*)\]\)",
            visit_processor,
        );
        reg.add("sink", r"Sink:\s+(\S+)\s+\(topic:\s+(.*)\)", visit_sink);
        reg.add("right-arrow", r"\s*-->\s+(.*)", visit_right_arrow);
        reg
    }

    /// Runs the first matching classifier against `line`.
    ///
    /// Returns the id of the classifier that handled the line, or `None` when the line is
    /// ignored. A line is handled by at most one classifier.
    pub fn dispatch(&self, line: &str, state: &mut TranslationState) -> Result<Option<&'static str>> {
        for classifier in &self.classifiers {
            if let Some(caps) = classifier.pattern.captures(line) {
                (classifier.handler)(&caps, state)?;
                return Ok(Some(classifier.id));
            }
        }
        Ok(None)
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a bracketed `a, b, c` list, trimming entries and dropping empties (so `[]` and a
/// trailing comma yield nothing).
fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|entry| !entry.is_empty())
}

fn visit_sub_topology(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()> {
    let sub_topology = &caps[1];
    state.open_block(sub_topology);
    state.sub_topologies.push(sub_topology.to_string());

    let color = state.colors.pick()?;
    let block_id = mermaid::block_id(sub_topology);
    state
        .class_assignments
        .push(mermaid::class_assignment(&block_id));
    state
        .class_definitions
        .push(mermaid::class_definition(&block_id, color));
    Ok(())
}

fn visit_source(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()> {
    state.current_node = caps[1].trim().to_string();
    for topic in split_list(&caps[2]) {
        state
            .outside
            .push(mermaid::source_edge(topic, &state.current_node));
        state.topic_sources.push(topic.to_string());
    }
    Ok(())
}

fn visit_processor(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()> {
    state.current_node = caps[1].trim().to_string();
    // Join processors read from their stores; everything else materializes into them.
    let join = state.current_node.contains("JOIN");
    for store in split_list(&caps[2]) {
        state
            .outside
            .push(mermaid::store_edge(&state.current_node, store, join));
        state.state_stores.push(store.to_string());
    }
    Ok(())
}

fn visit_sink(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()> {
    state.current_node = caps[1].trim().to_string();
    let topic = caps[2].trim();
    state
        .outside
        .push(mermaid::sink_edge(&state.current_node, topic));
    state.topic_sinks.push(topic.to_string());
    Ok(())
}

fn visit_right_arrow(caps: &Captures<'_>, state: &mut TranslationState) -> Result<()> {
    if state.current_node.is_empty() {
        // An arrow continuation before any node line has nothing to attach to. Emitting an
        // edge with an empty source would be malformed Mermaid, so the line is dropped.
        tracing::warn!(
            targets = caps[1].trim(),
            "arrow line before any node was introduced; skipping"
        );
        return Ok(());
    }
    for target in split_list(&caps[1]).filter(|target| *target != "none") {
        state
            .blocks
            .push(mermaid::stream_edge(&state.current_node, target));
    }
    Ok(())
}
