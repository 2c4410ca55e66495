//! Standalone HTML rendering with vis-network.

use super::GraphDocument;
use crate::error::Result;
use serde_json::json;

const VIS_NETWORK_URL: &str =
    "https://unpkg.com/vis-network@9.1.9/standalone/umd/vis-network.min.js";

fn network_options() -> serde_json::Value {
    json!({
        "nodes": {
            "shape": "dot",
            "scaling": { "min": 10, "max": 60 },
            "font": { "size": 14, "face": "Tahoma" }
        },
        "edges": {
            "arrows": { "to": { "enabled": true, "scaleFactor": 0.5 } },
            "color": { "inherit": "from", "opacity": 0.6 },
            "smooth": { "type": "continuous" },
            "scaling": { "min": 1, "max": 8 }
        },
        "physics": {
            "solver": "forceAtlas2Based",
            "forceAtlas2Based": {
                "gravitationalConstant": -80,
                "springLength": 120,
                "avoidOverlap": 0.4
            },
            "stabilization": { "iterations": 250 }
        },
        "interaction": { "hover": true, "navigationButtons": true, "tooltipDelay": 120 }
    })
}

/// JSON embedded in a `<script>` element must not close it early.
fn script_safe(json: String) -> String {
    json.replace("</", "<\\/")
}

/// Render `doc` as a self-contained page.
pub fn render_html(doc: &GraphDocument) -> Result<String> {
    let data = script_safe(serde_json::to_string(doc)?);
    let options = script_safe(serde_json::to_string(&network_options())?);
    let title = html_escape(doc.meta.chat_name.as_deref().unwrap_or("Chat interaction graph"));

    Ok(format!(
        r##"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{VIS_NETWORK_URL}"></script>
<style>
  html, body {{ margin: 0; height: 100%; background: #222222; }}
  #graph {{ width: 100%; height: 100%; }}
</style>
</head>
<body>
<div id="graph"></div>
<script>
  const doc = {data};
  const nodes = new vis.DataSet(doc.nodes.map(n => ({{
    id: n.id, label: n.label, title: n.label + " (" + n.value + ")",
    value: n.value, color: n.color, font: {{ color: "#ffffff" }}
  }})));
  const edges = new vis.DataSet(doc.edges.map(e => ({{
    from: e.from, to: e.to, value: e.weight, title: String(e.weight)
  }})));
  new vis.Network(document.getElementById("graph"), {{ nodes, edges }}, {options});
</script>
</body>
</html>
"##
    ))
}

fn html_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
