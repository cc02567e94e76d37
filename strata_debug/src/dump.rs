// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots of a reconciled scene.
//!
//! [`scene_json`] renders the retained scene as a nested JSON tree rooted at
//! the scene root; [`write_scene`] pretty-prints it to a writer. Useful for
//! diffing two sessions or attaching to a bug report.

use std::io::{self, Write};

use serde_json::{Map, Value, json};

use strata_core::constraint::ConstraintIndicator;
use strata_core::geometry::{Color, Point3};
use strata_core::reconcile::SceneGraphState;
use strata_core::scene::{Primitive, SceneId, SceneStore};

/// Renders `state` as JSON.
///
/// Reads local properties only, so it is accurate whether or not the store
/// was evaluated since the last sync.
#[must_use]
pub fn scene_json(state: &SceneGraphState) -> Value {
    let mut ids: Vec<&str> = state.retained_ids().collect();
    ids.sort_unstable();
    json!({
        "depth_scale": state.depth_scale(),
        "textures_visible": state.textures_visible(),
        "views": ids,
        "root_constraints": indicators_json(state.indicators(None)),
        "root": node_json(state, state.store(), state.root()),
    })
}

/// Pretty-prints [`scene_json`] to `writer`.
pub fn write_scene(state: &SceneGraphState, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &scene_json(state))?;
    writeln!(writer)
}

fn node_json(state: &SceneGraphState, store: &SceneStore, id: SceneId) -> Value {
    let mut obj = Map::new();
    obj.insert("handle".into(), json!(format!("{id:?}")));
    if let Some(view) = state.node_id(id) {
        obj.insert("view".into(), json!(view));
        let drawn = state.indicators(Some(view));
        if !drawn.is_empty() && state.parts(view).is_some_and(|p| p.group == id) {
            obj.insert("constraints".into(), indicators_json(drawn));
        }
    }
    obj.insert("primitive".into(), primitive_json(store.primitive(id)));
    obj.insert("position".into(), point_json(store.position(id)));
    let scale = store.scale(id);
    obj.insert("scale".into(), json!([scale.x, scale.y]));
    if !matches!(store.primitive(id), Primitive::Group) {
        obj.insert("color".into(), color_json(store.color(id)));
    }
    if let Some(texture) = store.texture(id) {
        obj.insert("texture".into(), json!(texture.0));
    }
    if store.flags(id).hidden {
        obj.insert("hidden".into(), json!(true));
    }
    let children: Vec<Value> = store
        .children(id)
        .map(|child| node_json(state, store, child))
        .collect();
    if !children.is_empty() {
        obj.insert("children".into(), Value::Array(children));
    }
    Value::Object(obj)
}

fn indicators_json(indicators: &[ConstraintIndicator]) -> Value {
    indicators
        .iter()
        .map(|i| {
            json!({
                "id": i.constraint_id,
                "owner": i.owner_id,
                "lines": i.lines.len(),
            })
        })
        .collect()
}

fn primitive_json(primitive: Primitive) -> Value {
    match primitive {
        Primitive::Group => json!({ "kind": "group" }),
        Primitive::TexturedQuad { size } => json!({
            "kind": "mesh",
            "size": [size.width, size.height],
        }),
        Primitive::Outline { size } => json!({
            "kind": "outline",
            "size": [size.width, size.height],
        }),
        Primitive::Overlay { size, opacity } => json!({
            "kind": "overlay",
            "size": [size.width, size.height],
            "opacity": opacity,
        }),
        Primitive::Line { from, to } => json!({
            "kind": "line",
            "from": point_json(from),
            "to": point_json(to),
        }),
    }
}

fn point_json(p: Point3) -> Value {
    json!([p.x, p.y, p.z])
}

fn color_json(c: Color) -> Value {
    json!(format!("#{:06x}", c.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use strata_core::reconcile::TextureRequest;
    use strata_core::error::TextureError;
    use strata_core::trace::Tracer;
    use strata_core::view::{ConstraintItem, ConstraintSpec, ViewNode};

    fn synced() -> SceneGraphState {
        let tree = ViewNode::view("a", 10.0, 20.0, 1.0, 4.0, 2.0)
            .selected(true)
            .with_child(ViewNode::view("b", 10.0, 20.0, 2.0, 1.0, 1.0));
        let mut state = SceneGraphState::default();
        let mut loader = |_: &TextureRequest<'_>| -> Result<(), TextureError> { Ok(()) };
        state
            .sync(&tree, &mut loader, &mut Tracer::none())
            .unwrap();
        state
    }

    #[test]
    fn dump_nests_view_groups() {
        let json = scene_json(&synced());
        assert_eq!(json["views"], json!(["a", "b"]));

        let a = &json["root"]["children"][0];
        assert_eq!(a["view"], "a");
        assert_eq!(a["position"], json!([10.0, 20.0, 1.0]));
        let kinds: Vec<&str> = a["children"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["primitive"]["kind"].as_str().unwrap())
            .collect();
        assert_eq!(kinds, ["mesh", "outline", "overlay", "group"]);
        assert_eq!(a["children"][1]["color"], "#2566c6");
    }

    #[test]
    fn dump_lists_drawn_constraints_on_their_owner() {
        let width = ConstraintSpec {
            first: ConstraintItem::new("b", 7),
            second: None,
        };
        let tree = ViewNode::group(vec![
            ViewNode::view("a", 10.0, 20.0, 1.0, 4.0, 2.0)
                .with_child(ViewNode::view("b", 10.0, 20.0, 2.0, 1.0, 1.0))
                .with_child(ViewNode::constraint("w", width).selected(true)),
        ]);
        let mut state = SceneGraphState::default();
        let mut loader = |_: &TextureRequest<'_>| -> Result<(), TextureError> { Ok(()) };
        state
            .sync(&tree, &mut loader, &mut Tracer::none())
            .unwrap();

        let json = scene_json(&state);
        assert_eq!(json["root_constraints"], json!([]));
        let a = &json["root"]["children"][0];
        assert_eq!(a["constraints"][0]["id"], "w");
        assert_eq!(a["constraints"][0]["owner"], "a");
        assert_eq!(a["constraints"][0]["lines"], 3);
        assert!(a["children"][0].get("constraints").is_none(), "mesh has none");
    }

    #[test]
    fn write_scene_emits_valid_json() {
        let mut out = Vec::new();
        write_scene(&synced(), &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed["depth_scale"], 1.0);
        assert!(out.ends_with(b"\n"));
    }
}
