use std::collections::HashMap;

use eframe::egui::{
    self, Align2, Color32, FontId, Pos2, Sense, Stroke, Ui, Vec2, pos2, vec2,
};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::data::{HierarchyNode, NodeKind, relation_label};
use crate::util::{format_amount, format_variance};

use super::super::expansion::ExpansionSet;
use super::super::radial::{Placed, radial_layout};
use super::super::render_utils::{
    circle_visible, clip_to_circle, dim_color, draw_arrowhead, draw_background, edge_label_size,
    edge_opacity, edge_width, node_radius, node_stroke_width, variance_color,
};
use super::super::viewport::{content_bounds, handle_canvas_gestures, world_to_screen};
use super::super::{RadialCache, ViewModel};
use super::interaction::hovered_entry;

const SELECTED_STROKE: Color32 = Color32::from_rgb(245, 158, 11);
const SEARCH_STROKE: Color32 = Color32::from_rgb(59, 130, 246);
const LABEL_COLOR: Color32 = Color32::from_rgb(51, 65, 85);
const VALUE_COLOR: Color32 = Color32::from_rgb(100, 116, 139);

/// Everything one frame needs about a visible node, detached from the
/// tree so expansion can be toggled after drawing.
struct RadialEntry {
    id: String,
    label: String,
    value: f64,
    variance: f64,
    kind: NodeKind,
    level: usize,
    pos: Vec2,
    has_children: bool,
    collapsed: bool,
    matched: bool,
}

/// Parent-to-child arrow, with the child's relation label if present.
struct RadialEdge {
    parent: usize,
    child: usize,
    relation: Option<String>,
}

impl ViewModel {
    fn ensure_radial_cache(&mut self) {
        let revision = self.expansion.revision();
        if matches!(&self.radial_cache, Some(cache) if cache.revision == revision) {
            return;
        }
        self.radial_cache = Some(RadialCache {
            revision,
            placed: radial_layout(&self.data.tree, &self.expansion),
        });
    }

    pub(in crate::app) fn draw_radial(&mut self, ui: &mut Ui) {
        self.ensure_radial_cache();

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let (entries, edges, bounds) = {
            let Some(cache) = self.radial_cache.as_ref() else {
                return;
            };
            let matcher = (!self.search.trim().is_empty()).then(SkimMatcherV2::default);
            let mut entries = Vec::new();
            let mut edges = Vec::new();
            collect_entries(
                &self.data.tree,
                None,
                &cache.placed,
                &self.expansion,
                matcher.as_ref(),
                self.search.trim(),
                &mut entries,
                &mut edges,
            );
            let bounds = content_bounds(cache.placed.values().map(|placed| placed.pos));
            (entries, edges, bounds)
        };

        let (window, scale) = handle_canvas_gestures(
            &mut self.radial_viewport,
            &mut self.radial_drag,
            ui,
            rect,
            &response,
            bounds,
        );
        let did_drag = self.radial_drag.did_drag;

        draw_background(
            &painter,
            rect,
            self.radial_viewport.pan * scale,
            self.radial_viewport.zoom,
        );

        self.visible_node_count = entries.len();
        self.visible_edge_count = edges.len();

        let search_active = entries.iter().any(|entry| entry.matched);
        let text_scale = scale.clamp(0.55, 1.5);

        let screen: Vec<(Pos2, f32)> = entries
            .iter()
            .map(|entry| {
                (
                    world_to_screen(window, rect, entry.pos),
                    node_radius(entry.kind, entry.variance) * scale,
                )
            })
            .collect();

        for edge in &edges {
            let (parent_pos, parent_radius) = screen[edge.parent];
            let (child_pos, child_radius) = screen[edge.child];
            let level = entries[edge.child].level;

            let start = clip_to_circle(parent_pos, parent_radius, child_pos);
            let end = clip_to_circle(child_pos, child_radius, parent_pos);
            let alpha = (edge_opacity(level) * 255.0) as u8;
            let color = Color32::from_rgba_unmultiplied(100, 116, 139, alpha);
            let width = edge_width(level) * scale.clamp(0.5, 1.5);

            painter.line_segment([start, end], Stroke::new(width, color));
            draw_arrowhead(&painter, end, start, (8.0 * scale).clamp(4.0, 12.0), color);

            if let Some(relation) = &edge.relation {
                let mid = pos2((start.x + end.x) * 0.5, (start.y + end.y) * 0.5);
                painter.text(
                    mid,
                    Align2::CENTER_CENTER,
                    relation,
                    FontId::proportional(edge_label_size(level) * text_scale),
                    Color32::from_rgba_unmultiplied(71, 85, 105, alpha.saturating_add(40)),
                );
            }
        }

        let hovered = hovered_entry(ui, &screen);
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        for (index, entry) in entries.iter().enumerate() {
            let (pos, radius) = screen[index];
            if !circle_visible(rect, pos, radius) {
                continue;
            }

            let base = variance_color(entry.variance);
            let fill = if search_active && !entry.matched {
                dim_color(base, 0.35)
            } else {
                base
            };
            let is_selected = self.selected.as_deref() == Some(entry.id.as_str());

            painter.circle_filled(pos, radius, fill);
            painter.circle_stroke(
                pos,
                radius,
                Stroke::new(node_stroke_width(entry.level), Color32::WHITE),
            );
            if is_selected {
                painter.circle_stroke(pos, radius + 4.0, Stroke::new(3.0, SELECTED_STROKE));
            } else if search_active && entry.matched {
                painter.circle_stroke(pos, radius + 3.0, Stroke::new(2.0, SEARCH_STROKE));
            } else if hovered == Some(index) {
                painter.circle_stroke(pos, radius + 2.0, Stroke::new(1.5, LABEL_COLOR));
            }

            if radius > 9.0 {
                painter.text(
                    pos - vec2(0.0, radius + 6.0),
                    Align2::CENTER_BOTTOM,
                    &entry.label,
                    FontId::proportional(entry.kind.label_font() * text_scale),
                    LABEL_COLOR,
                );
                painter.text(
                    pos + vec2(0.0, radius + 6.0),
                    Align2::CENTER_TOP,
                    format_amount(entry.value),
                    FontId::proportional(entry.kind.value_font() * text_scale * 0.9),
                    VALUE_COLOR,
                );
                painter.text(
                    pos,
                    Align2::CENTER_CENTER,
                    format_variance(entry.variance),
                    FontId::proportional(entry.kind.value_font() * text_scale),
                    Color32::WHITE,
                );
            }

            if entry.has_children && entry.collapsed {
                let badge = pos + vec2(radius * 0.7, -radius * 0.7);
                painter.circle_filled(badge, 7.0 * text_scale, Color32::WHITE);
                painter.circle_stroke(badge, 7.0 * text_scale, Stroke::new(1.2, fill));
                painter.text(
                    badge,
                    Align2::CENTER_CENTER,
                    "+",
                    FontId::proportional(10.0 * text_scale),
                    fill,
                );
            }
        }

        if response.clicked_by(egui::PointerButton::Primary) && !did_drag {
            match hovered {
                Some(index) => {
                    let entry = &entries[index];
                    self.selected = Some(entry.id.clone());
                    if entry.has_children {
                        self.expansion.toggle(&entry.id, &self.data.tree);
                    }
                }
                None => self.selected = None,
            }
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn collect_entries(
    node: &HierarchyNode,
    parent: Option<usize>,
    placed: &HashMap<String, Placed>,
    expansion: &ExpansionSet,
    matcher: Option<&SkimMatcherV2>,
    query: &str,
    entries: &mut Vec<RadialEntry>,
    edges: &mut Vec<RadialEdge>,
) {
    let Some(placement) = placed.get(&node.id) else {
        return;
    };

    let matched = matcher.is_some_and(|matcher| {
        matcher.fuzzy_match(&node.label, query).is_some()
            || matcher.fuzzy_match(&node.id, query).is_some()
    });
    let expanded = expansion.contains(&node.id);

    let index = entries.len();
    entries.push(RadialEntry {
        id: node.id.clone(),
        label: node.label.clone(),
        value: node.value,
        variance: node.variance,
        kind: node.kind,
        level: placement.level,
        pos: placement.pos,
        has_children: node.has_children(),
        collapsed: !expanded,
        matched,
    });

    if let Some(parent) = parent {
        edges.push(RadialEdge {
            parent,
            child: index,
            relation: node
                .relation
                .as_deref()
                .map(|code| relation_label(code).to_owned()),
        });
    }

    if expanded {
        for child in &node.children {
            collect_entries(
                child,
                Some(index),
                placed,
                expansion,
                matcher,
                query,
                entries,
                edges,
            );
        }
    }
}
