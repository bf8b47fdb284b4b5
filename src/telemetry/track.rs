use crate::telemetry::fetch::HourlySnapshot;
use crate::telemetry::parsing::parse_position;
use crate::telemetry::selection::select_representative;
use crate::telemetry::{BalloonTrack, Position, SelectedBalloons};

pub const BALLOON_COLORS: [&str; 16] = [
    "#FF6B6B", // coral red
    "#4ECDC4", // teal
    "#45B7D1", // sky blue
    "#96CEB4", // sage green
    "#FFEAA7", // soft yellow
    "#DDA0DD", // plum
    "#98D8C8", // mint
    "#F7DC6F", // sunflower
    "#BB8FCE", // lavender
    "#85C1E9", // light blue
    "#F8B500", // amber
    "#00CED1", // dark turquoise
    "#FF7F50", // coral
    "#9FE2BF", // sea green
    "#DE3163", // cerise
    "#40E0D0", // turquoise
];

pub fn color_for(rank: usize) -> &'static str {
    BALLOON_COLORS[rank % BALLOON_COLORS.len()]
}

/// Collect every parseable fix of balloon `id` across the snapshot.
///
/// Returns `None` unless the balloon has a valid current (hour 0) position.
pub fn build_track(snapshot: &HourlySnapshot, id: usize, color: &str) -> Option<BalloonTrack> {
    let positions: Vec<Position> = snapshot
        .hours
        .iter()
        .enumerate()
        .filter_map(|(hour, entries)| {
            entries
                .get(id)
                .and_then(|entry| parse_position(entry, hour as i32))
        })
        .collect();

    let current = *positions.first().filter(|p| p.hours_ago == 0)?;

    Some(BalloonTrack {
        id,
        color: color.to_string(),
        positions,
        current,
        future_positions: None,
    })
}

/// Spatially representative subset of the current constellation, each with
/// its full history.
pub fn selected_balloons(snapshot: &HourlySnapshot, count: usize) -> SelectedBalloons {
    let selection = select_representative(snapshot.current(), count);

    let balloons = selection
        .indices
        .iter()
        .enumerate()
        .filter_map(|(rank, &id)| build_track(snapshot, id, color_for(rank)))
        .collect();

    SelectedBalloons {
        balloons,
        total_count: selection.total_count,
    }
}

pub fn current_positions(snapshot: &HourlySnapshot) -> Vec<Position> {
    snapshot
        .current()
        .iter()
        .filter_map(|entry| parse_position(entry, 0))
        .collect()
}
