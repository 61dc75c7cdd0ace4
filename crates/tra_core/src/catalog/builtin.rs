//! Token tables for the retail release of Tomb Raider: Anniversary.
//!
//! Checkpoint ids are `<area prefix><number>`. Numbers are not contiguous
//! within an area: the game's own numbering was reshuffled during development,
//! so each group lists the ids it actually contains.

use super::{AdvancedOption, CheckpointEntry, LevelGroup, OutfitEntry};

const CHECKPOINT: &str = "Checkpoint";
const MENU: &str = "Menu";
const STYLE_UNIT: &str = "Style unit";
const CUTSCENE: &str = "Cutscene";

/// Builds `prefix<id>` entries captioned `"<caption> <n>"`, counting from `first`.
fn checkpoints<I>(prefix: &str, ids: I, caption: &str, first: usize) -> Vec<CheckpointEntry>
where
    I: IntoIterator<Item = u32>,
{
    ids.into_iter()
        .enumerate()
        .map(|(n, id)| {
            CheckpointEntry::new(format!("{prefix}{id}"), format!("{caption} {}", n + first))
        })
        .collect()
}

fn numbered<I>(prefix: &str, ids: I) -> Vec<CheckpointEntry>
where
    I: IntoIterator<Item = u32>,
{
    checkpoints(prefix, ids, CHECKPOINT, 1)
}

fn group(name: &str, checkpoints: Vec<CheckpointEntry>) -> LevelGroup {
    LevelGroup::with_checkpoints(name, checkpoints)
}

pub(super) fn level_groups() -> Vec<LevelGroup> {
    let mut lost_city_style = checkpoints("lcpuhall", [1], STYLE_UNIT, 1);
    lost_city_style.extend(checkpoints("lostcitystyle", [1], STYLE_UNIT, 2));

    let mut cinematics = vec![
        CheckpointEntry::new("cn4", "St. Francis Folly"),
        CheckpointEntry::new("cn8", "Final cutscene (Natla's mines)"),
        CheckpointEntry::new("cn9", "Temple of Khamoon"),
    ];
    cinematics.extend(checkpoints("cn", [1, 2, 3, 5, 6, 7, 10], CUTSCENE, 4));

    vec![
        LevelGroup::implicit("Main Menu"),
        group("Mansion", numbered("ma", 1..18)),

        group("Peru - Mountain Caves", numbered("pu", 1..8)),
        group("Peru - City of Vilcabamba", numbered("pu", [8, 9, 90, 10])),
        group("Peru - Lost Valley", numbered("pu", [11, 12, 13, 14, 15, 94, 95])),
        group("Peru - Tomb of Qualopec", numbered("pu", [16, 161, 17, 18, 19, 20, 21, 22, 23])),
        group("Peru - Frontend", checkpoints("pu", [104], MENU, 1)),

        group("Greece - St. Francis Folly", numbered("gr", 1..12)),
        group("Greece - Coliseum", numbered("gr", [12, 13, 14, 15, 31])),
        group("Greece - Midas' Palace", numbered("gr", 18..25)),
        group("Greece - Tomb of Tihocan", numbered("gr", 27..31)),
        group("Greece - Frontend", checkpoints("gr", [104], MENU, 1)),
        group("Greece - Other", numbered("gr", [16, 17, 25, 26, 32])),

        group("Egypt - Temple of Khamoon", numbered("eg", 1..11)),
        group("Egypt - Obelisk of Khamoon", numbered("eg", 11..18)),
        group("Egypt - Sanctuary of the Scion", numbered("eg", 20..32)),
        group("Egypt - Frontend", checkpoints("eg", [104], MENU, 1)),
        group("Egypt - Other", numbered("eg", [18, 19, 32, 33])),

        group("Lost City - Natla's Mines", numbered("lc", [1, 2, 3, 5, 11, 14])),
        group("Lost City - Great Pyramid", numbered("lc", [10, 12, 13, 15, 16])),
        group("Lost City - Final Conflict", numbered("lc", [6, 7, 16, 17, 18, 19, 20])),
        group("Lost City - Frontend", checkpoints("lc", [104], MENU, 1)),

        group("Style Units Peru", checkpoints("pusource", [1, 2, 3], STYLE_UNIT, 1)),
        group("Style Units Greece", checkpoints("grsource", [1, 2], STYLE_UNIT, 1)),
        group("Style Units Egypt", checkpoints("egyptstyle", [1, 3], STYLE_UNIT, 1)),
        group("Style Units Lost City", lost_city_style),

        group("Cinematics", cinematics),
        group("Other", Vec::new()),
    ]
}

#[rustfmt::skip]
const OUTFITS: &[(Option<&str>, &str)] = &[
    (None,                 "Default"),
    (Some("lara_classic"), "Classic Lara"),
    (Some("lara_natla"),   "Scorched Natla"),
    (Some("lara_sport"),   "Lara Sport"),
    (Some("lara_aod"),     "AOD Lara"),
    (Some("lara_legend"),  "Legend Lara"),
    (Some("lara_wetsuit"), "Wetsuit"),
    (Some("lara_catsuit"), "Catsuit"),
    (Some("lara_gold"),    "Golden Lara"),
    (Some("lara_dgang"),   "Bacon Lara"),
    (Some("lara"),         "Lara"),
];

// (flag, caption, takes parameter)
#[rustfmt::skip]
const ADVANCED_OPTIONS: &[(&str, &str, bool)] = &[
    ("-DRAWMONSTERATTACK", "Draw monster attack", false),
    ("-DRAWMONSTERCOMBAT", "Draw monster combat", false),
    ("-EASYCHEAT",         "Easy Cheat mode",     false),
    ("-FONTNAME",          "Font name",           true),
    ("-CHAPTERVARS",       "Chapter variables",   true),
    ("-MAINMENU",          "Show Main Menu",      false),
    ("-NOHINTS",           "Don't show hints",    false),
    ("-NOMONSTERATTACK",   "No monster attack",   false),
    ("-NOTRACE",           "No trace",            false),
    ("-NOVIBRATION",       "No vibration",        false),
    ("-NOHEALTH",          "God Mode",            false),
    ("-NOMONSTERHEALTH",   "No monster health",   false),
];

pub(super) fn outfits() -> Vec<OutfitEntry> {
    OUTFITS
        .iter()
        .map(|&(id, caption)| OutfitEntry::new(id, caption))
        .collect()
}

pub(super) fn advanced_options() -> Vec<AdvancedOption> {
    ADVANCED_OPTIONS
        .iter()
        .map(|&(flag, caption, takes_parameter)| {
            AdvancedOption::new(flag, caption, takes_parameter)
        })
        .collect()
}
