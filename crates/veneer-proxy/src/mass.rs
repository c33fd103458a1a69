//! Mass quantization and physics-property delegation.
//!
//! The codec packs a continuous mass into one byte with a monotonic,
//! piecewise-linear band layout tuned for resolution at low mass. The byte
//! in turn splits into two 4-bit fields for storage in 16-value state
//! schema properties.

use std::sync::Arc;

use veneer_blocks::registry::BlockRegistry;
use veneer_blocks::types::Block;

use crate::entity::ProxyEntity;

/// Default mass reported for an empty proxy cell.
pub const DEFAULT_MASS: f64 = 100.0;
/// Default used by the frame convention of the physics integration.
pub const FRAME_DEFAULT_MASS: f64 = 10.0;

/// Encode saturates above this input mass.
pub const MAX_MASS: f64 = 4400.0;

/// Quantizes a mass into an 8-bit code. Clamps to `[0, MAX_MASS]`, rounds
/// down within a band, saturates at 255.
pub fn encode(mass: f64) -> u8 {
    let m = mass.clamp(0.0, MAX_MASS);
    let code = if m < 50.0 {
        m as u32
    } else if m < 150.0 {
        50 + ((m - 50.0) / 2.0) as u32
    } else if m < 400.0 {
        100 + ((m - 150.0) / 5.0) as u32
    } else if m < 900.0 {
        150 + ((m - 400.0) / 10.0) as u32
    } else {
        200 + ((m - 900.0) / 50.0) as u32
    };
    code.min(255) as u8
}

/// Exact per-band inverse of [`encode`].
pub fn decode(code: u8) -> f64 {
    let c = code as f64;
    if code < 50 {
        c
    } else if code < 100 {
        50.0 + (c - 50.0) * 2.0
    } else if code < 150 {
        150.0 + (c - 100.0) * 5.0
    } else if code < 200 {
        400.0 + (c - 150.0) * 10.0
    } else {
        900.0 + (c - 200.0) * 50.0
    }
}

/// Splits a code into `(hi, lo)` 4-bit fields with `code == hi * 16 + lo`.
#[inline]
pub fn split_nibbles(code: u8) -> (u8, u8) {
    (code >> 4, code & 0x0F)
}

#[inline]
pub fn join_nibbles(hi: u8, lo: u8) -> u8 {
    (hi << 4) | (lo & 0x0F)
}

/// Hardness-band mass estimator used when no physics backend is present.
pub fn estimate_base_mass(hardness: f32) -> f64 {
    if hardness < 0.0 {
        1000.0
    } else if hardness == 0.0 {
        1.0
    } else if hardness < 0.5 {
        10.0
    } else if hardness < 2.0 {
        50.0
    } else if hardness < 5.0 {
        100.0
    } else {
        200.0
    }
}

/// External physics backend, when one is installed. Absence is a normal
/// configuration, not an error.
pub trait PhysicsBackend {
    /// The material's own per-cell mass, if the backend knows it.
    fn base_mass(&self, material: Block) -> Option<f64>;
}

/// Computes effective physical properties of a proxy cell as the copied
/// material's base property times the shape-dependent multiplier.
pub struct MassDelegation {
    backend: Option<Arc<dyn PhysicsBackend>>,
    default_mass: f64,
}

impl MassDelegation {
    pub fn new(backend: Option<Arc<dyn PhysicsBackend>>) -> Self {
        Self {
            backend,
            default_mass: DEFAULT_MASS,
        }
    }

    pub fn with_default_mass(mut self, default_mass: f64) -> Self {
        self.default_mass = default_mass;
        self
    }

    pub fn effective_mass(&self, entity: &ProxyEntity, registry: &BlockRegistry) -> f64 {
        let record = entity.record();
        let Some(material) = record.material() else {
            return self.default_mass;
        };
        let base = self
            .backend
            .as_ref()
            .and_then(|b| b.base_mass(material))
            .unwrap_or_else(|| {
                let hardness = registry.get(material.id).map(|ty| ty.hardness).unwrap_or(2.0);
                estimate_base_mass(hardness)
            });
        base * entity.effective_multiplier(registry)
    }

    pub fn effective_hardness(&self, entity: &ProxyEntity, registry: &BlockRegistry) -> f32 {
        let record = entity.record();
        let Some(snapshot) = record.snapshot() else {
            return registry.get(entity.own().id).map(|ty| ty.hardness).unwrap_or(2.0);
        };
        if snapshot.hardness < 0.0 {
            // Unbreakable stays unbreakable regardless of shape.
            return snapshot.hardness;
        }
        snapshot.hardness * entity.effective_multiplier(registry) as f32
    }

    pub fn effective_resistance(&self, entity: &ProxyEntity, registry: &BlockRegistry) -> f32 {
        let record = entity.record();
        let Some(snapshot) = record.snapshot() else {
            return registry
                .get(entity.own().id)
                .map(|ty| ty.blast_resistance)
                .unwrap_or(6.0);
        };
        snapshot.blast_resistance * entity.effective_multiplier(registry) as f32
    }

    /// Per-tick destroy progress for the host's break overlay. Mirrors the
    /// host formula: unbreakable = 0, zero hardness = instant.
    pub fn destroy_progress(
        &self,
        entity: &ProxyEntity,
        registry: &BlockRegistry,
        actor_speed: f32,
    ) -> f32 {
        let hardness = self.effective_hardness(entity, registry);
        if hardness < 0.0 {
            return 0.0;
        }
        if hardness == 0.0 {
            return 1.0;
        }
        actor_speed / hardness / 30.0
    }
}
