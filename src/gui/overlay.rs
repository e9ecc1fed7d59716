use crate::catalog::OVERVIEW_NAME;

/// Top-left heads-up text: title, current target, and the key map.
pub fn hud_text(target_name: &str) -> String {
    format!(
        "Solar System Orrery
Current target: {}

[0] Overview
[1] Mercury
[2] Venus
[3] Earth
[4] Mars",
        target_name
    )
}

pub fn fps_text(fps: f64) -> String {
    format!("FPS: {:.0}", fps)
}

/// A few lines about the tracked planet, shown under the HUD. Nothing for
/// the overview, and nothing for bodies we have no copy for.
pub fn body_facts(name: &str) -> &'static [&'static str] {
    match name {
        "Mercury" => &[
            "Closest planet to the Sun",
            "Extremely hot during day, freezing at night",
            "No atmosphere or moons",
            "Orbital period: 88 Earth days",
        ],
        "Venus" => &[
            "Hottest planet in solar system",
            "Thick toxic atmosphere",
            "Rotates backwards (retrograde)",
            "Often called Earth's twin",
        ],
        "Earth" => &[
            "Our home planet",
            "Only known planet with life",
            "71% of surface covered by water",
            "Has one natural satellite: the Moon",
        ],
        "Mars" => &[
            "The Red Planet",
            "Has the largest volcano in solar system",
            "Thin atmosphere, mostly CO2",
            "Evidence of ancient water flows",
        ],
        _ => &[],
    }
}

/// The full lower block for the current target, or `None` when there is
/// nothing to show.
pub fn facts_text(target_name: &str) -> Option<String> {
    if target_name == OVERVIEW_NAME {
        return None;
    }
    let facts = body_facts(target_name);
    if facts.is_empty() {
        return None;
    }
    Some(format!("{}\n- {}", target_name, facts.join("\n- ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hud_names_the_target() {
        let text = hud_text("Earth");
        assert!(text.contains("Current target: Earth"));
        assert!(text.contains("[4] Mars"));
    }

    #[test]
    fn facts_for_the_four_tracked_planets() {
        for name in ["Mercury", "Venus", "Earth", "Mars"] {
            assert!(!body_facts(name).is_empty(), "no facts for {}", name);
        }
    }

    #[test]
    fn no_facts_block_for_overview_or_unlisted_bodies() {
        assert!(facts_text(OVERVIEW_NAME).is_none());
        assert!(facts_text("Sun").is_none());
        assert!(facts_text("Earth").unwrap().contains("home planet"));
    }
}
