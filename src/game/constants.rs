/// Size-related constants
pub mod size {
    /// Size scaling factor: size = sqrt(score) * SCALE
    pub const SCALE: f32 = 2.0;
}

/// Collision resolution constants
pub mod collision {
    /// Coarse prefilter for cell-vs-cell: distance < (size_a + size_b) * COARSE_FACTOR
    pub const COARSE_FACTOR: f32 = 1.5;
    /// Flat score bonus awarded on top of the victim's score
    pub const KILL_BONUS: f32 = 100.0;
}

/// Geometry tolerances
pub mod geometry {
    /// Cross products / areas below this are treated as zero
    pub const EPSILON: f32 = 1e-6;
}

/// Cosmetic constants for spawned entities
pub mod cosmetic {
    /// Saturation / lightness used for `hsl(h, S%, L%)` colors
    pub const SATURATION: u8 = 50;
    pub const LIGHTNESS: u8 = 50;

    /// Names handed out to AI players
    pub const AI_NAMES: &[&str] = &[
        "Delta", "Prism", "Wedge", "Spike", "Vertex", "Arrow", "Shard", "Tri",
        "Cone", "Fang", "Blade", "Pyra", "Ridge", "Edge", "Sliver", "Point",
    ];
}

/// Leaderboard constants
pub mod leaderboard {
    /// Entries shown by default
    pub const DEFAULT_LIMIT: usize = 5;
}

/// Camera constants
pub mod camera {
    /// Viewport assumed until the renderer reports its real size
    pub const DEFAULT_VIEWPORT_WIDTH: f32 = 1280.0;
    pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 720.0;
}

/// Calculate collision/render size from score
#[inline]
pub fn score_to_size(score: f32) -> f32 {
    score.max(0.0).sqrt() * size::SCALE
}

/// Format an `hsl()` color for the given hue in degrees
pub fn hsl_color(hue: f32) -> String {
    format!(
        "hsl({:.0}, {}%, {}%)",
        hue.rem_euclid(360.0),
        cosmetic::SATURATION,
        cosmetic::LIGHTNESS
    )
}
