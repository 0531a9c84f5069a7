//! Mermaid flowchart text fragments and final document assembly.
//!
//! Node shapes follow the flowchart conventions: `id[label]` for topics (rectangle),
//! `id(label)` for processing nodes (rounded), `id[(label)]` for state stores (cylinder).
//! The raw identifier stays the addressable node id; only the display label is rewritten.

use crate::classify::TranslationState;

pub const DIAGRAM_HEADER: &str = "graph TD";
pub const SUBGRAPH_CLOSE: &str = "end";

const TOPOLOGY_PREFIX: &str = "topology";

/// Display label for a generated identifier: every `-` becomes `-<br>` so long names like
/// `KSTREAM-AGGREGATE-0000000003` wrap inside their node instead of stretching it.
pub fn break_label(name: &str) -> String {
    name.replace('-', "-<br>")
}

/// `topic --> source`. Topic labels are kept raw; only the node label wraps.
pub fn source_edge(topic: &str, source: &str) -> String {
    format!("{topic}[{topic}] --> {source}({})", break_label(source))
}

/// `processor --> store`, reversed to `store --> processor` for join processors, which read
/// from the store rather than materialize into it.
pub fn store_edge(processor: &str, store: &str, join: bool) -> String {
    if join {
        format!(
            "{store}[({})] --> {processor}({})",
            break_label(store),
            break_label(processor)
        )
    } else {
        format!(
            "{processor}({}) --> {store}[({})]",
            break_label(processor),
            break_label(store)
        )
    }
}

/// `sink --> topic`.
pub fn sink_edge(sink: &str, topic: &str) -> String {
    format!("{sink}({}) --> {topic}[{topic}]", break_label(sink))
}

/// Intra-topology `node --> node` edge.
pub fn stream_edge(from: &str, to: &str) -> String {
    format!("{from}({}) --> {to}({})", break_label(from), break_label(to))
}

/// Block id of a sub-topology, shared by the subgraph, its class binding, and its class def.
pub fn block_id(sub_topology: &str) -> String {
    format!("{TOPOLOGY_PREFIX}{sub_topology}")
}

pub fn subgraph_open(sub_topology: &str) -> String {
    format!(
        "subgraph {TOPOLOGY_PREFIX}{sub_topology} [Sub-Topology: {sub_topology}]"
    )
}

pub fn class_assignment(block_id: &str) -> String {
    format!("class {block_id} fill_{block_id}")
}

pub fn class_definition(block_id: &str, color: &str) -> String {
    format!("classDef fill_{block_id} fill:{color}")
}

/// Concatenates the accumulated sections in their fixed order.
///
/// Section order is part of the output contract: header, outside edges, sub-topology blocks
/// (open/close markers interleaved with intra-block edges), source-topic declarations,
/// sink-topic declarations, store declarations, class assignments, class definitions. The bare
/// declaration lines guarantee every referenced topic and store renders as a node even when it
/// has no further edges.
pub fn assemble(state: &TranslationState) -> String {
    let sections = [
        &state.outside,
        &state.blocks,
        &state.topic_sources,
        &state.topic_sinks,
        &state.state_stores,
        &state.class_assignments,
        &state.class_definitions,
    ];

    let mut lines = Vec::with_capacity(1 + sections.iter().map(|s| s.len()).sum::<usize>());
    lines.push(DIAGRAM_HEADER);
    for section in sections {
        lines.extend(section.iter().map(String::as_str));
    }
    lines.join("\n")
}
