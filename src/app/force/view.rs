use eframe::egui::{
    self, Align2, Color32, FontId, Rect, Sense, Stroke, StrokeKind, Ui, pos2, vec2,
};

use crate::data::NodeKind;
use crate::util::format_variance;

use super::super::render_utils::{
    clip_to_rect, draw_arrowhead, draw_background, force_link_color, force_palette,
};
use super::super::viewport::{content_bounds, handle_canvas_gestures, world_to_screen};
use super::super::{ForceCache, ForceDrawNode, ViewModel};

const SELECTED_STROKE: Color32 = Color32::from_rgb(245, 158, 11);

impl ViewModel {
    fn rebuild_force_cache(&mut self, ui: &Ui) {
        let revision = self.force.revision();
        if matches!(&self.force_cache, Some(cache) if cache.revision == revision) {
            return;
        }

        let visible = self.force.visible_subgraph(&self.data.graph);

        let mut nodes = Vec::with_capacity(visible.nodes.len());
        let mut half_extents = Vec::with_capacity(visible.nodes.len());
        for entry in &visible.nodes {
            let wire = &self.data.graph.nodes[entry.index];
            let kind = NodeKind::from_wire(&wire.kind, wire.level as usize);

            let label_width = ui.fonts_mut(|fonts| {
                fonts
                    .layout_no_wrap(
                        wire.label.clone(),
                        FontId::proportional(kind.label_font()),
                        Color32::WHITE,
                    )
                    .size()
                    .x
            });
            let value_width = ui.fonts_mut(|fonts| {
                fonts
                    .layout_no_wrap(
                        format_variance(wire.val),
                        FontId::proportional(kind.value_font()),
                        Color32::WHITE,
                    )
                    .size()
                    .x
            });
            let width = label_width.max(value_width) + 28.0;
            let height = kind.label_font() + kind.value_font() + 22.0;
            half_extents.push(vec2(width * 0.5, height * 0.5));

            nodes.push(ForceDrawNode {
                id: wire.id.clone(),
                label: wire.label.clone(),
                sublabel: wire.sublabel.clone(),
                kind: wire.kind.clone(),
                val: wire.val,
                level: wire.level,
                hidden_children: entry.hidden_children,
            });
        }

        let ids: Vec<String> = nodes.iter().map(|node| node.id.clone()).collect();
        let levels: Vec<u32> = nodes.iter().map(|node| node.level).collect();
        let plain_edges: Vec<(usize, usize)> = visible
            .edges
            .iter()
            .map(|&(source, target, _)| (source, target))
            .collect();

        let positions = super::relax_layout(
            &ids,
            &levels,
            &half_extents,
            &plain_edges,
            &self.force.positions,
            180,
        );
        for (id, position) in ids.iter().zip(&positions) {
            self.force.positions.insert(id.clone(), *position);
        }

        self.force_cache = Some(ForceCache {
            revision,
            nodes,
            edges: visible.edges,
            half_extents,
            positions,
        });
    }

    pub(in crate::app) fn draw_force(&mut self, ui: &mut Ui) {
        self.rebuild_force_cache(ui);

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        let bounds = match self.force_cache.as_ref() {
            Some(cache) => content_bounds(cache.positions.iter().copied()),
            None => return,
        };

        let (window, scale) = handle_canvas_gestures(
            &mut self.force_viewport,
            &mut self.force_drag,
            ui,
            rect,
            &response,
            bounds,
        );
        let did_drag = self.force_drag.did_drag;

        draw_background(&painter, rect, self.force_viewport.pan * scale, self.force_viewport.zoom);

        let Some(cache) = self.force_cache.as_ref() else {
            return;
        };
        self.visible_node_count = cache.nodes.len();
        self.visible_edge_count = cache.edges.len();

        let screen_rects: Vec<Rect> = cache
            .nodes
            .iter()
            .enumerate()
            .map(|(slot, _)| {
                let center = world_to_screen(window, rect, cache.positions[slot]);
                Rect::from_center_size(center, cache.half_extents[slot] * 2.0 * scale)
            })
            .collect();

        for &(source, target, ref label) in &cache.edges {
            let from_center = screen_rects[source].center();
            let to_center = screen_rects[target].center();
            let start = clip_to_rect(from_center, cache.half_extents[source] * scale, to_center);
            let end = clip_to_rect(to_center, cache.half_extents[target] * scale, from_center);

            let color = force_link_color(label.as_deref());
            painter.line_segment([start, end], Stroke::new(1.6, color));
            draw_arrowhead(&painter, end, start, (9.0 * scale).clamp(5.0, 12.0), color);

            if let Some(text) = label {
                let mid = pos2((start.x + end.x) * 0.5, (start.y + end.y) * 0.5);
                let galley = painter.layout_no_wrap(
                    text.clone(),
                    FontId::proportional((10.0 * scale).clamp(7.0, 12.0)),
                    color,
                );
                // White backing so the label stays readable over edges.
                let backing = Rect::from_center_size(mid, galley.size() + vec2(6.0, 2.0));
                painter.rect_filled(backing, 2.0, Color32::from_rgba_unmultiplied(255, 255, 255, 220));
                painter.galley(mid - galley.size() * 0.5, galley, color);
            }
        }

        // Topmost node under the pointer wins; later slots draw on top.
        let pointer = ui.input(|input| input.pointer.hover_pos());
        let hovered = pointer.and_then(|pointer| {
            screen_rects
                .iter()
                .enumerate()
                .rev()
                .find(|(_, screen)| screen.contains(pointer))
                .map(|(slot, _)| slot)
        });
        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let text_scale = scale.clamp(0.6, 1.4);
        for (slot, node) in cache.nodes.iter().enumerate() {
            let screen = screen_rects[slot];
            if !rect.intersects(screen) {
                continue;
            }

            let kind = NodeKind::from_wire(&node.kind, node.level as usize);
            let (fill, border, text) = force_palette(&node.kind);
            let is_selected = self.selected.as_deref() == Some(node.id.as_str());
            let is_hovered = hovered == Some(slot);

            let corner = 6.0 * text_scale;
            painter.rect_filled(screen, corner, fill);
            let accent = Rect::from_min_max(
                screen.left_top(),
                pos2(screen.left() + 4.0 * text_scale, screen.bottom()),
            );
            painter.rect_filled(accent, corner, border);
            let stroke = if is_selected {
                Stroke::new(3.0, SELECTED_STROKE)
            } else if is_hovered {
                Stroke::new(2.2, border)
            } else {
                Stroke::new(1.4, border)
            };
            painter.rect_stroke(screen, corner, stroke, StrokeKind::Inside);

            painter.text(
                screen.center() - vec2(0.0, kind.value_font() * 0.55 * text_scale),
                Align2::CENTER_CENTER,
                &node.label,
                FontId::proportional(kind.label_font() * text_scale),
                text,
            );
            painter.text(
                screen.center() + vec2(0.0, kind.label_font() * 0.65 * text_scale),
                Align2::CENTER_CENTER,
                format_variance(node.val),
                FontId::proportional(kind.value_font() * text_scale),
                text,
            );
            if let Some(sublabel) = &node.sublabel {
                painter.text(
                    screen.center_bottom() + vec2(0.0, 6.0 * text_scale),
                    Align2::CENTER_TOP,
                    sublabel,
                    FontId::proportional(8.0 * text_scale),
                    Color32::from_rgb(100, 116, 139),
                );
            }

            if node.hidden_children > 0 {
                let badge = screen.right_top();
                painter.circle_filled(badge, 9.0 * text_scale, border);
                painter.text(
                    badge,
                    Align2::CENTER_CENTER,
                    format!("+{}", node.hidden_children),
                    FontId::proportional(8.5 * text_scale),
                    Color32::WHITE,
                );
            }
        }

        if response.clicked_by(egui::PointerButton::Primary) && !did_drag {
            match hovered {
                Some(slot) => {
                    let node = &cache.nodes[slot];
                    let id = node.id.clone();
                    let level = node.level;
                    self.selected = Some(id.clone());
                    // Every click toggles, leaves included: a leaf click
                    // still raises the level ceiling.
                    self.force.click(&id, level);
                }
                None => self.selected = None,
            }
        }
    }
}
