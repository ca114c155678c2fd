//! Plain-text output for each command

use std::fmt::Write;
use tincture_animation::{EffectFrame, EffectPlan, EffectTrack};
use tincture_theme::{
    Initialized, PlayedEffect, StateSource, ThemeCatalog, ThemeState, TransitionKind,
    TransitionOutcome, Viewport,
};

pub fn status(state: &ThemeState, catalog: &ThemeCatalog, initialized: &Initialized) -> String {
    let label = catalog
        .get(&state.theme)
        .map(|t| t.label().to_string())
        .unwrap_or_else(|| "not in catalog".to_string());
    let mut out = String::new();
    let _ = writeln!(out, "theme:      {} ({label})", state.theme);
    let _ = writeln!(out, "mode:       {}", state.mode);
    let _ = writeln!(
        out,
        "transition: {} ({})",
        state.transition,
        state.transition.config().name
    );
    let source = match initialized.source {
        StateSource::Storage => "stored",
        StateSource::Ambient if initialized.persisted => "system preference (saved)",
        StateSource::Ambient => "system preference (not saved)",
    };
    let _ = writeln!(out, "source:     {source}");
    out
}

pub fn themes(catalog: &ThemeCatalog, active: &str) -> String {
    let width = catalog.names().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for theme in catalog.iter() {
        let marker = if theme.name == active { '*' } else { ' ' };
        let _ = writeln!(out, "{marker} {:width$}  {}", theme.name, theme.label());
    }
    out
}

pub fn transitions(active: TransitionKind) -> String {
    let mut out = String::new();
    for kind in TransitionKind::ALL {
        let config = kind.config();
        let marker = if kind == active { '*' } else { ' ' };
        let _ = writeln!(
            out,
            "{marker} {:<10}  {:<12}  {:>5}ms  {}",
            kind.id(),
            config.name,
            config.duration_ms,
            config.easing.to_css()
        );
    }
    out
}

pub fn outcome(outcome: &TransitionOutcome, played: Option<&PlayedEffect>) -> String {
    match outcome {
        TransitionOutcome::Instant(reason) => format!("changed instantly ({reason})\n"),
        TransitionOutcome::Animated {
            kind,
            origin,
            radius,
        } => {
            let duration = played.map_or(0, |p| p.plan.duration_ms());
            format!("played {kind} from {origin} over {duration}ms (radius {radius:.1}px)\n")
        }
        TransitionOutcome::Degraded(reason) => format!("changed without effect: {reason}\n"),
    }
}

/// Evenly spaced samples of every track in the plan
pub fn preview(kind: TransitionKind, plan: &EffectPlan, frames: u32) -> String {
    let config = kind.config();
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}), {}ms total",
        config.name,
        kind.id(),
        plan.duration_ms()
    );
    for track in plan.tracks() {
        preview_track(&mut out, track, frames.max(2));
    }
    out
}

/// Every layer `elapsed_ms` into the effect, with translation resolved to
/// pixels against the viewport
pub fn snapshot_at(plan: &EffectPlan, elapsed_ms: f32, viewport: Viewport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "at {elapsed_ms}ms of {}ms", plan.duration_ms());
    for (layer, frame) in plan.sample_at(elapsed_ms) {
        let _ = write!(out, "{}  {}", layer.pseudo_element(), declarations(&frame));
        let offset = frame
            .transform
            .as_ref()
            .map(|t| t.resolved_translate(viewport.width, viewport.height))
            .filter(|&(x, y)| x != 0.0 || y != 0.0);
        if let Some((x, y)) = offset {
            let _ = write!(out, "  (offset {x:.0}px, {y:.0}px)");
        }
        out.push('\n');
    }
    out
}

fn declarations(frame: &EffectFrame) -> String {
    frame
        .css_declarations()
        .into_iter()
        .map(|(property, value)| format!("{property}: {value}"))
        .collect::<Vec<_>>()
        .join("; ")
}

fn preview_track(out: &mut String, track: &EffectTrack, frames: u32) {
    let _ = writeln!(
        out,
        "{} {}ms {}",
        track.layer.pseudo_element(),
        track.duration_ms,
        track.easing.to_css()
    );
    for i in 0..frames {
        let progress = i as f32 / (frames - 1) as f32;
        let declarations = declarations(&track.sample(progress));
        let _ = writeln!(out, "  {:>3.0}%  {declarations}", progress * 100.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tincture_theme::{InstantReason, Point};

    #[test]
    fn transitions_mark_the_active_one() {
        let table = transitions(TransitionKind::Glitch);
        assert_eq!(table.lines().count(), 13);
        let active: Vec<_> = table.lines().filter(|l| l.starts_with('*')).collect();
        assert_eq!(active.len(), 1);
        assert!(active[0].contains("glitch"));
        assert!(active[0].contains("steps(6)"));
    }

    #[test]
    fn themes_list_labels_in_catalog_order() {
        let list = themes(&ThemeCatalog::builtin(), "slate");
        let first = list.lines().next().unwrap();
        assert!(first.starts_with("  default"));
        assert!(list.contains("* slate"));
    }

    #[test]
    fn preview_samples_both_endpoints() {
        let plan = TransitionKind::Fade.config().plan(Point::new(0.0, 0.0), 100.0);
        let text = preview(TransitionKind::Fade, &plan, 2);
        assert_eq!(
            text,
            "Fade (fade), 200ms total\n\
             ::view-transition-new(root) 200ms ease-in-out\n\
             \x20   0%  opacity: 0; transform: scale(0.95)\n\
             \x20 100%  opacity: 1; transform: scale(1)\n"
        );
    }

    #[test]
    fn snapshot_resolves_slide_offset_against_viewport() {
        let plan = TransitionKind::Slide.config().plan(Point::new(0.0, 0.0), 100.0);
        let text = snapshot_at(&plan, 0.0, Viewport::new(800.0, 600.0));
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "at 0ms of 500ms");
        assert!(lines[1].starts_with("::view-transition-new(root)  opacity: 0;"));
        assert!(lines[1].ends_with("(offset -800px, 0px)"));
    }

    #[test]
    fn instant_outcome_names_the_reason() {
        assert_eq!(
            outcome(&TransitionOutcome::Instant(InstantReason::ReducedMotion), None),
            "changed instantly (reduced motion requested)\n"
        );
    }
}
