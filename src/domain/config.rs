// ============================================================================
// Calculation Configuration
// Angle mode, iteration precision and growth ceilings for iterative operations
// ============================================================================

use crate::numeric::{NumericError, NumericResult};
use parking_lot::Mutex;
use std::f64::consts::PI;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard ceiling on Newton iterations regardless of configured precision.
pub const MAX_ROOT_ITERATIONS: u32 = 10_000;

// ============================================================================
// Angle Mode
// ============================================================================

/// How angle arguments are interpreted by trigonometric consumers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleMode {
    /// Full turn = 2π
    Radians,
    /// Full turn = 360
    Degrees,
    /// Full turn = 400
    Gradians,
}

impl AngleMode {
    /// Convert an angle expressed in this mode to radians.
    pub fn to_radians(self, angle: f64) -> f64 {
        match self {
            AngleMode::Radians => angle,
            AngleMode::Degrees => angle * PI / 180.0,
            AngleMode::Gradians => angle * PI / 200.0,
        }
    }

    /// Convert radians to an angle expressed in this mode.
    pub fn from_radians(self, radians: f64) -> f64 {
        match self {
            AngleMode::Radians => radians,
            AngleMode::Degrees => radians * 180.0 / PI,
            AngleMode::Gradians => radians * 200.0 / PI,
        }
    }
}

// ============================================================================
// Calculation Configuration
// ============================================================================

/// Settings consulted by root extraction, hyperoperations and the factorial
/// family.
///
/// The value is `Copy`: operations capture it once at entry, so a concurrent
/// change never affects a computation already in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculationConfig {
    /// Angle interpretation for trigonometric consumers
    pub angle_mode: AngleMode,

    /// Iteration budget for approximations (capped at `MAX_ROOT_ITERATIONS`)
    pub precision: u32,

    /// Highest hyperoperation level accepted (3 = tetration)
    pub max_hyper_level: u32,

    /// Largest hyperoperation height (right operand) accepted
    pub max_height: u64,

    /// Largest number of decimal digits a hyperoperation may produce
    pub max_digits: u64,

    /// Largest operand accepted by the factorial family
    pub max_factorial_operand: u64,
}


impl CalculationConfig {
    /// Default configuration
    pub const DEFAULT: Self = Self {
        angle_mode: AngleMode::Radians,
        precision: 1_000,
        max_hyper_level: 9,
        max_height: 1_000_000,
        max_digits: 100_000,
        max_factorial_operand: 10_000,
    };

    /// Create a configuration with default settings
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Builder method: Set angle mode
    pub fn with_angle_mode(mut self, angle_mode: AngleMode) -> Self {
        self.angle_mode = angle_mode;
        self
    }

    /// Builder method: Set iteration precision
    pub fn with_precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Builder method: Set maximum hyperoperation level
    pub fn with_max_hyper_level(mut self, level: u32) -> Self {
        self.max_hyper_level = level;
        self
    }

    /// Builder method: Set maximum hyperoperation height
    pub fn with_max_height(mut self, height: u64) -> Self {
        self.max_height = height;
        self
    }

    /// Builder method: Set maximum result digits for hyperoperations
    pub fn with_max_digits(mut self, digits: u64) -> Self {
        self.max_digits = digits;
        self
    }

    /// Builder method: Set maximum factorial operand
    pub fn with_max_factorial_operand(mut self, operand: u64) -> Self {
        self.max_factorial_operand = operand;
        self
    }

    /// Newton iterations to run: precision capped at `MAX_ROOT_ITERATIONS`.
    pub fn root_iterations(&self) -> u32 {
        self.precision.min(MAX_ROOT_ITERATIONS)
    }

    /// Validate the configuration
    pub fn validate(&self) -> NumericResult<()> {
        if self.precision == 0 {
            return Err(NumericError::InvalidConfig(
                "precision must be positive".to_string(),
            ));
        }
        if self.max_hyper_level < 2 {
            return Err(NumericError::InvalidConfig(
                "max hyperoperation level must allow exponentiation".to_string(),
            ));
        }
        if self.max_digits == 0 {
            return Err(NumericError::InvalidConfig(
                "max digits must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for CalculationConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// Preset Configurations (Factory Methods)
// ============================================================================

impl CalculationConfig {
    /// High iteration budget and generous growth ceilings
    pub fn precise() -> Self {
        Self::new()
            .with_precision(MAX_ROOT_ITERATIONS)
            .with_max_digits(1_000_000)
            .with_max_factorial_operand(100_000)
    }

    /// Small iteration budget and tight ceilings for interactive use
    pub fn fast() -> Self {
        Self::new()
            .with_precision(64)
            .with_max_height(10_000)
            .with_max_digits(10_000)
            .with_max_factorial_operand(1_000)
    }
}

// ============================================================================
// Process-wide Configuration
// ============================================================================

/// Base configuration plus the overrides of live scopes, newest last.
///
/// Each scope owns one frame keyed by its guard id, so guards may drop in
/// any order (or on any thread) without resurrecting a stale override.
struct ConfigSlot {
    base: CalculationConfig,
    scopes: Vec<(u64, CalculationConfig)>,
    next_id: u64,
}

impl ConfigSlot {
    const fn new() -> Self {
        Self {
            base: CalculationConfig::DEFAULT,
            scopes: Vec::new(),
            next_id: 0,
        }
    }

    fn effective(&self) -> CalculationConfig {
        self.scopes.last().map_or(self.base, |(_, config)| *config)
    }

    fn top_mut(&mut self) -> &mut CalculationConfig {
        match self.scopes.last_mut() {
            Some((_, config)) => config,
            None => &mut self.base,
        }
    }
}

static SLOT: Mutex<ConfigSlot> = parking_lot::const_mutex(ConfigSlot::new());

impl CalculationConfig {
    /// Snapshot of the process-wide configuration.
    pub fn current() -> Self {
        SLOT.lock().effective()
    }

    /// Replace the process-wide configuration, returning the previous one.
    ///
    /// Inside a scope this replaces the innermost scope's override, which is
    /// discarded when that scope ends.
    ///
    /// # Errors
    /// Returns `InvalidConfig` if validation fails; nothing is replaced.
    pub fn install(self) -> NumericResult<Self> {
        self.validate()?;
        let previous = std::mem::replace(SLOT.lock().top_mut(), self);
        tracing::debug!(?previous, current = ?self, "calculation config installed");
        Ok(previous)
    }

    /// Install this configuration until the returned guard is dropped.
    ///
    /// The guard removes exactly its own override on every exit path,
    /// including unwinding and out-of-order drops.
    pub fn scoped(self) -> NumericResult<ConfigGuard> {
        self.validate()?;
        let mut slot = SLOT.lock();
        let previous = slot.effective();
        let id = slot.next_id;
        slot.next_id += 1;
        slot.scopes.push((id, self));
        drop(slot);

        tracing::debug!(id, ?previous, current = ?self, "calculation config scoped");
        Ok(ConfigGuard { id, previous })
    }
}

/// Removes its scope's override from the process-wide configuration when
/// dropped.
#[must_use = "the configuration is restored as soon as the guard is dropped"]
#[derive(Debug)]
pub struct ConfigGuard {
    id: u64,
    previous: CalculationConfig,
}

impl ConfigGuard {
    /// Configuration that was in effect when the scope was entered.
    pub fn previous(&self) -> &CalculationConfig {
        &self.previous
    }
}

impl Drop for ConfigGuard {
    fn drop(&mut self) {
        let mut slot = SLOT.lock();
        if let Some(position) = slot.scopes.iter().rposition(|(id, _)| *id == self.id) {
            slot.scopes.remove(position);
        }
        let restored = slot.effective();
        drop(slot);
        tracing::debug!(id = self.id, ?restored, "calculation config scope ended");
    }
}

/// Run `f` with `config` scoped process-wide, removing the override
/// afterwards.
pub fn with_config<R>(config: CalculationConfig, f: impl FnOnce() -> R) -> NumericResult<R> {
    let _guard = config.scoped()?;
    Ok(f())
}
