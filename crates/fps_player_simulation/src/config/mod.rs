//! Movement tunables (MovementConfig) + загрузка из RON
//!
//! Значения по умолчанию совпадают с exported свойствами player сцены.
//! Конфиг задаётся один раз при инициализации контроллера и дальше только читается.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Tunables контроллера
///
/// # Units
/// - `speed`, `jump_power`, `max_terminal_velocity`: м/с
/// - `acceleration`, `air_acceleration`: 1/с (вес интерполяции = rate * delta)
/// - `gravity`: м/с, вычитается из вертикальной скорости **за physics step** (не за секунду)
/// - `mouse_sensitivity`: градусы за pixel
/// - `min_pitch`, `max_pitch`: градусы
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    pub speed: f32,
    pub acceleration: f32,
    pub air_acceleration: f32,
    pub gravity: f32,
    pub max_terminal_velocity: f32,
    pub jump_power: f32,
    pub shoot_power: f32,
    pub mouse_sensitivity: f32,
    pub min_pitch: f32,
    pub max_pitch: f32,
    /// Сколько живёт projectile после выстрела (секунды)
    pub projectile_lifetime_secs: f32,
    /// Resource path шаблона projectile (резолвится host'ом)
    pub projectile_template: String,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 20.0,
            acceleration: 15.0,
            air_acceleration: 5.0,
            gravity: 0.98,
            max_terminal_velocity: 54.0,
            jump_power: 20.0,
            shoot_power: 20.0,
            mouse_sensitivity: 0.3,
            min_pitch: -90.0,
            max_pitch: 90.0,
            projectile_lifetime_secs: 5.0,
            projectile_template: "res://scenes/Bullet.tscn".to_string(),
        }
    }
}

impl MovementConfig {
    /// Допустимый диапазон mouse_sensitivity (property hint "0.1,1.0")
    pub const MOUSE_SENSITIVITY_RANGE: (f32, f32) = (0.1, 1.0);
    /// Допустимый диапазон min_pitch (property hint "-90,0")
    pub const MIN_PITCH_RANGE: (f32, f32) = (-90.0, 0.0);
    /// Допустимый диапазон max_pitch (property hint "0,90")
    pub const MAX_PITCH_RANGE: (f32, f32) = (0.0, 90.0);
    /// Допустимый lifetime projectile (секунды)
    pub const PROJECTILE_LIFETIME_RANGE: (f32, f32) = (f32::MIN_POSITIVE, 3600.0);

    /// Проверка инвариантов конфига
    ///
    /// Отрицательные скорости/ускорения и NaN отклоняются,
    /// sensitivity и pitch limits проверяются по диапазонам property hints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("speed", self.speed),
            ("acceleration", self.acceleration),
            ("air_acceleration", self.air_acceleration),
            ("gravity", self.gravity),
            ("max_terminal_velocity", self.max_terminal_velocity),
            ("jump_power", self.jump_power),
            ("shoot_power", self.shoot_power),
        ];

        for (field, value) in non_negative {
            check_range(field, value, 0.0, f32::MAX)?;
        }

        // Прыжок не может быть быстрее terminal velocity
        check_range("jump_power", self.jump_power, 0.0, self.max_terminal_velocity)?;

        let (min, max) = Self::MOUSE_SENSITIVITY_RANGE;
        check_range("mouse_sensitivity", self.mouse_sensitivity, min, max)?;

        let (min, max) = Self::MIN_PITCH_RANGE;
        check_range("min_pitch", self.min_pitch, min, max)?;

        let (min, max) = Self::MAX_PITCH_RANGE;
        check_range("max_pitch", self.max_pitch, min, max)?;

        // Нулевой lifetime = projectile удаляется в том же шаге, где появился
        let (min, max) = Self::PROJECTILE_LIFETIME_RANGE;
        check_range("projectile_lifetime_secs", self.projectile_lifetime_secs, min, max)?;

        Ok(())
    }

    /// Lifetime как Duration (невалидное значение → `Duration::MAX`, без panic)
    pub fn projectile_lifetime(&self) -> Duration {
        Duration::try_from_secs_f32(self.projectile_lifetime_secs).unwrap_or(Duration::MAX)
    }

    /// Парсит RON и валидирует результат
    ///
    /// Отсутствующие поля берутся из `Default`.
    pub fn from_ron_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}

fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<(), ConfigError> {
    // `!(a <= b)` вместо `a > b`: NaN тоже не проходит
    if !(value >= min) || !(value <= max) {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Ошибки загрузки/валидации конфига
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },
}
