use crate::DotOptions;
use crate::util::{escape_html_into, js_number, quote_id};
use lignee_core::ordinal_fr;
use lignee_layout::{FamilyGraph, PersonId, is_light};
use rustc_hash::FxHashSet as HashSet;

const ANCHOR: &str = "anchor_invisible";
const HIDDEN: &str = "arrowhead=none height=0 style=invisible width=0";
/// Years covered by a generation label: `first_year + i` to `first_year + i + 5`, saturating.
const GENERATION_SPAN: i64 = 5;
const RESPONSIBLE_TITLE: &str = "Resp";
const FALLBACK_FILL: &str = "#ffffff";

/// Emits the Graphviz description of a laid-out graph. An empty graph yields an empty string.
///
/// Output is line-oriented and tab-indented: header, generation labels chained from an
/// invisible anchor, person nodes, parent/child edges, ordering edges, then one `rank=same`
/// block per band.
pub fn render_dot(graph: &FamilyGraph, first_year: i64, options: &DotOptions) -> String {
    if graph.is_empty() {
        return String::new();
    }

    let mut lines: Vec<String> = Vec::with_capacity(graph.len() * 4 + 16);
    lines.push("digraph {".to_string());
    lines.push("\trankdir=TB".to_string());
    lines.push("\tsplines=spline".to_string());
    lines.push(format!("\tnodesep={}", js_number(options.nodesep)));
    lines.push(format!("\t{ANCHOR} [{HIDDEN}]"));

    let named = graph.named_generation_count();
    for i in 0..named {
        let year = first_year.saturating_add(i as i64);
        lines.push(format!(
            "\tgen_label_{i} [label=<<B>{} génération</B> ({year} - {}) > fillcolor=lightgrey fixedsize=true fontweight=bold penwidth=4 shape=box style=\"filled,rounded\" width=4]",
            ordinal_fr(i + 1, true),
            year.saturating_add(GENERATION_SPAN),
        ));
        lines.push(format!("\tspacer_{i} [label=\"\" {HIDDEN}]"));
        let previous = if i == 0 {
            ANCHOR.to_string()
        } else {
            format!("spacer_{}", i - 1)
        };
        lines.push(format!("\t{previous} -> spacer_{i} [{HIDDEN}]"));
        lines.push(format!("\tspacer_{i} -> gen_label_{i} [{HIDDEN}]"));
    }

    for band in graph.generations() {
        for &id in band {
            lines.push(person_node(graph, id, options));
        }
    }

    push_family_edges(&mut lines, graph);
    push_ordering_edges(&mut lines, graph);

    for (i, band) in graph.generations().iter().enumerate() {
        if i >= named && band.is_empty() {
            continue;
        }
        lines.push("\t{".to_string());
        lines.push("\t\trank=same".to_string());
        if i < named {
            lines.push(format!("\t\t\"gen_label_{i}\""));
            lines.push(format!("\t\t\"spacer_{i}\""));
        }
        for &id in band {
            lines.push(format!("\t\t{}", quote_id(&graph.node_id(id))));
        }
        lines.push("\t}".to_string());
    }

    lines.push("}".to_string());
    let dot = lines.join("\n");
    tracing::debug!(
        people = graph.len(),
        bands = graph.generations().len(),
        lines = lines.len(),
        bytes = dot.len(),
        "emitted graph description"
    );
    dot
}

/// Border width for a title: `Resp` gets the thickest border, any other title a medium one.
pub fn title_pen_width(title: Option<&str>) -> &'static str {
    match title {
        Some(RESPONSIBLE_TITLE) => "4",
        Some(_) => "2.5",
        None => "1",
    }
}

fn person_node(graph: &FamilyGraph, id: PersonId, options: &DotOptions) -> String {
    let person = &graph[id];
    let node = quote_id(&graph.node_id(id));
    if person.invisible {
        return format!("\t{node} [fixedsize=true height=0 label=\"\" style=invisible width=0]");
    }

    let mut label = String::new();
    escape_html_into(&mut label, &person.name);
    if options.show_debug_info {
        let position = person
            .position
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "[]".to_string());
        label.push_str("<FONT POINT-SIZE=\"8\"><br/>");
        label.push_str(&position);
        label.push_str("<br/>joins: ");
        label.push_str(&person.joins.to_string());
        label.push_str("</FONT>");
    } else if let Some(title) = person.title.as_deref() {
        label.push_str("<FONT POINT-SIZE=\"8\"><br/>");
        escape_html_into(&mut label, title);
        label.push_str("</FONT>");
    }

    let color = person.color.as_deref().unwrap_or(FALLBACK_FILL);
    let fill = if color.starts_with('#') {
        format!("\"{color}\"")
    } else {
        color.to_string()
    };
    let font = if is_light(color) { "black" } else { "white" };

    format!(
        "\t{node} [label=<{label}> fillcolor={fill} fontcolor={font} penwidth={} shape=box style=\"filled,rounded\"]",
        title_pen_width(person.title.as_deref()),
    )
}

fn push_family_edges(lines: &mut Vec<String>, graph: &FamilyGraph) {
    let mut seen: HashSet<(PersonId, PersonId)> = HashSet::default();
    for band in graph.generations() {
        for &parent in band {
            for &child in &graph[parent].children {
                if !seen.insert((parent, child)) {
                    continue;
                }
                let attrs = if graph[parent].invisible || graph[child].invisible {
                    "arrowhead=none style=invisible weight=500"
                } else {
                    "weight=1000"
                };
                lines.push(format!(
                    "\t{} -> {} [{attrs}]",
                    quote_id(&graph.node_id(parent)),
                    quote_id(&graph.node_id(child)),
                ));
            }
        }
    }
}

/// Chains neighbours of every band with invisible edges. Neighbours from different lineages
/// are pushed further apart the bigger both lineages are.
fn push_ordering_edges(lines: &mut Vec<String>, graph: &FamilyGraph) {
    let sizes = graph.tree_sizes();
    let size_of = |tree: Option<i64>| tree.and_then(|t| sizes.get(&t).copied()).unwrap_or(0);

    for band in graph.generations() {
        for pair in band.windows(2) {
            let (left, right) = (pair[0], pair[1]);
            let (left_tree, right_tree) = (graph[left].tree_id(), graph[right].tree_id());
            let minlen = if left_tree == right_tree {
                "1".to_string()
            } else {
                let combined = (size_of(left_tree) + size_of(right_tree)) as f64;
                js_number(2.0 + 0.4 * combined.sqrt())
            };
            lines.push(format!(
                "\t{} -> {} [arrowhead=none minlen={minlen} style=invisible weight=1]",
                quote_id(&graph.node_id(left)),
                quote_id(&graph.node_id(right)),
            ));
        }
    }
}
