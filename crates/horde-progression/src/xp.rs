//! Experience curve and level-up resolution.

use horde_core::components::Experience;

/// Total XP needed to be at `level`. Level 1 needs nothing; each further
/// level follows `n * 5 + n^2` with `n = level - 1`.
/// Saturates at `u32::MAX` for levels past the reach of a `u32` XP total.
pub fn xp_threshold(level: u32) -> u32 {
    u32::try_from(wide_threshold(level)).unwrap_or(u32::MAX)
}

fn wide_threshold(level: u32) -> u64 {
    let n = u64::from(level.saturating_sub(1));
    n * 5 + n * n
}

/// Highest level whose threshold is at or below `xp`.
pub fn level_for_xp(xp: u32) -> u32 {
    let xp = u64::from(xp);
    let mut level = 1;
    while wide_threshold(level + 1) <= xp {
        level += 1;
    }
    level
}

/// Add XP and return every level crossed, in increasing order.
pub fn grant_xp(experience: &mut Experience, amount: u32) -> Vec<u32> {
    experience.xp = experience.xp.saturating_add(amount);
    let new_level = level_for_xp(experience.xp);
    let crossed: Vec<u32> = (experience.level + 1..=new_level).collect();
    if let Some(&last) = crossed.last() {
        experience.level = last;
    }
    crossed
}

/// Progress from the current level's threshold to the next, clamped to `[0, 1]`.
pub fn xp_percent_to_next_level(experience: &Experience) -> f32 {
    let this_level = xp_threshold(experience.level);
    let next_level = xp_threshold(experience.level + 1);
    let span = next_level.saturating_sub(this_level);
    if span == 0 {
        return 0.0;
    }
    let into = experience.xp.saturating_sub(this_level);
    (into as f32 / span as f32).clamp(0.0, 1.0)
}
