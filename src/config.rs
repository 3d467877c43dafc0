use std::str::FromStr;

/// Configuration errors reported by [`GameConfig::validate`]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be positive")]
    NotPositive(&'static str),
    #[error("{0} cannot be negative")]
    Negative(&'static str),
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("ai_min_score ({min}) cannot exceed ai_max_score ({max})")]
    AiScoreRange { min: f32, max: f32 },
    #[error("max_spawn_attempts must be at least 1")]
    NoSpawnAttempts,
}

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Side length of the square world
    pub world_size: f32,
    /// Target number of food items
    pub food_count: usize,
    /// Target number of AI players
    pub ai_count: usize,
    /// Score given to a freshly spawned player cell
    pub starting_score: f32,
    /// Collision/render size of a food item
    pub food_size: f32,
    /// Score gained per food item
    pub food_score: f32,
    /// A cell eats another only when `size_a > size_b * collision_threshold`
    pub collision_threshold: f32,
    /// Clearance kept from existing cells when spawning
    pub safe_spawn_distance: f32,
    /// Candidates tried before falling back to a random position
    pub max_spawn_attempts: u32,
    /// Score range for new AI players
    pub ai_min_score: f32,
    pub ai_max_score: f32,
    /// Simulation tick rate in Hz
    pub tick_rate: u32,
    /// Display name of the local player
    pub player_name: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            world_size: 3000.0,
            food_count: 300,
            ai_count: 10,
            starting_score: 100.0,
            food_size: 5.0,
            food_score: 10.0,
            collision_threshold: 1.1,
            safe_spawn_distance: 100.0,
            max_spawn_attempts: 50,
            ai_min_score: 50.0,
            ai_max_score: 300.0,
            tick_rate: 60,
            player_name: "Player".to_string(),
        }
    }
}

impl GameConfig {
    /// Load config from environment or use defaults
    pub fn load_or_default() -> Self {
        let mut config = Self::default();

        env_override("WORLD_SIZE", &mut config.world_size, |v: &f32| {
            v.is_finite() && *v > 0.0
        });
        env_override("FOOD_COUNT", &mut config.food_count, |v| *v <= 100_000);
        env_override("AI_COUNT", &mut config.ai_count, |v| *v <= 1_000);
        env_override("STARTING_SCORE", &mut config.starting_score, |v: &f32| {
            v.is_finite() && *v >= 0.0
        });
        env_override("FOOD_SCORE", &mut config.food_score, |v: &f32| {
            v.is_finite() && *v >= 0.0
        });
        env_override("COLLISION_THRESHOLD", &mut config.collision_threshold, |v: &f32| {
            v.is_finite() && *v > 0.0
        });
        env_override("TICK_RATE", &mut config.tick_rate, |v| *v > 0 && *v <= 240);

        if let Ok(name) = std::env::var("PLAYER_NAME") {
            if !name.trim().is_empty() {
                config.player_name = name;
            }
        }

        config
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("world_size", self.world_size),
            ("food_size", self.food_size),
            ("collision_threshold", self.collision_threshold),
        ] {
            require_finite(name, value)?;
            if value <= 0.0 {
                return Err(ConfigError::NotPositive(name));
            }
        }
        for (name, value) in [
            ("starting_score", self.starting_score),
            ("food_score", self.food_score),
            ("safe_spawn_distance", self.safe_spawn_distance),
        ] {
            require_finite(name, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative(name));
            }
        }
        require_finite("ai_min_score", self.ai_min_score)?;
        require_finite("ai_max_score", self.ai_max_score)?;

        if self.tick_rate == 0 {
            return Err(ConfigError::NotPositive("tick_rate"));
        }
        if self.max_spawn_attempts == 0 {
            return Err(ConfigError::NoSpawnAttempts);
        }
        if self.ai_min_score > self.ai_max_score {
            return Err(ConfigError::AiScoreRange {
                min: self.ai_min_score,
                max: self.ai_max_score,
            });
        }
        Ok(())
    }

    /// Tick duration in milliseconds
    pub fn tick_duration_ms(&self) -> u64 {
        1000 / u64::from(self.tick_rate.max(1))
    }
}

fn require_finite(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(name))
    }
}

/// Replace `field` with the parsed env var when it parses and passes `valid`
fn env_override<T>(name: &str, field: &mut T, valid: impl Fn(&T) -> bool)
where
    T: FromStr + std::fmt::Debug,
{
    let Ok(raw) = std::env::var(name) else {
        return;
    };
    match raw.parse::<T>() {
        Ok(parsed) if valid(&parsed) => *field = parsed,
        Ok(parsed) => tracing::warn!("{} out of range ({:?}), using default", name, parsed),
        Err(_) => tracing::warn!("Invalid {} '{}', using default", name, raw),
    }
}
