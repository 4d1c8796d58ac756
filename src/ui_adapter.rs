//! JSON views for a rendering client.
//!
//! The engine itself never paints anything; a host UI asks for these views to
//! draw the live container, the ghost render of the current target, the hint
//! panel, and the score strip. Shapes here follow what a web client expects:
//! CSS keyword strings, pixel strings, camelCase keys.

use serde_json::{json, Value};

use crate::challenge_engine::detector::resolved_target_items;
use crate::challenge_engine::models::{Challenge, Item};
use crate::challenge_engine::session::QuizSession;

fn item_view(item: &Item) -> Value {
    json!({
        "id": item.id,
        "alignSelf": item.align_self.to_string(),
        "flexGrow": item.flex_grow,
        "flexShrink": item.flex_shrink,
        "order": item.order,
        "width": item.width.to_string(),
        "height": item.height.to_string(),
    })
}

/// The ghost render's inputs: the target container plus every active item
/// with its effective (override-merged) properties.
pub fn ghost_view(challenge: &Challenge, baseline: &[Item]) -> Value {
    let items: Vec<Value> = resolved_target_items(challenge, baseline)
        .iter()
        .map(item_view)
        .collect();
    json!({
        "challengeId": challenge.challenge_id,
        "container": {
            "display": "flex",
            "flexDirection": challenge.container.flex_direction.to_string(),
            "justifyContent": challenge.container.justify_content.to_string(),
            "alignItems": challenge.container.align_items.to_string(),
            "flexWrap": challenge.container.flex_wrap.to_string(),
            "gap": challenge.container.gap.to_string(),
        },
        "constraint": challenge.constraint.map(|c| json!({
            "axis": c.axis.to_string(),
            "limit": c.limit.to_string(),
        })),
        "items": items,
    })
}

/// Everything a client needs to draw one frame of the session.
pub fn session_view(session: &QuizSession) -> Value {
    let cfg = session.config();
    let container = cfg.container();
    let items: Vec<Value> = cfg.active_items().iter().map(item_view).collect();

    let ghost = session
        .current_challenge()
        .map(|c| ghost_view(c, cfg.baseline_items()));

    let hints: Vec<Value> = session
        .hint_log()
        .iter()
        .map(|h| json!({
            "key": h.key.to_string(),
            "text": h.text,
            "resolved": h.resolved,
        }))
        .collect();

    json!({
        "container": {
            "display": container.display.to_string(),
            "flexDirection": container.flex_direction.to_string(),
            "justifyContent": container.justify_content.to_string(),
            "alignItems": container.align_items.to_string(),
            "flexWrap": container.flex_wrap.to_string(),
            "gap": container.gap.to_string(),
        },
        "items": items,
        "itemCount": cfg.item_count(),
        "ghost": ghost,
        "history": {
            "length": session.history().len(),
            "cursor": session.history().cursor(),
            "atLive": session.history().is_at_live(),
        },
        "score": session.state().score,
        "targetQuestionCount": session.state().target_question_count,
        "completed": session.state().completed,
        "matched": session.matched(),
        "cooldown": {
            "running": session.cooldown().running(),
            "paused": session.cooldown().paused(),
            "remainingMs": session.cooldown().remaining_ms(),
            "progress": session.cooldown().progress(),
        },
        "hints": {
            "entries": hints,
            "count": session.hints().hint_count(),
            "solutionPromptShown": session.hints().solution_prompt_shown(),
            "solutionRevealed": session.hints().solution_revealed(),
            "panelOpen": session.hints().panel_open(),
        },
    })
}
