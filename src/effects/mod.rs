//! The effect gallery. Each effect owns its own state and math; the only
//! thing they share is the `Renderer` lifecycle.

pub mod flow_field;
pub mod fractal_tree;
pub mod particles;
pub mod plasma;
pub mod starfield;

use crate::core::{EffectDescriptor, Registry, RegistryError};

/// Declaration order is gallery order; the first entry is the fallback.
pub fn catalogue() -> Vec<EffectDescriptor> {
    vec![
        EffectDescriptor {
            name: "Particle Swarm",
            category: "Particles",
            factory: particles::ParticleSwarm::boxed,
            hover_gated: false,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Warp Starfield",
            category: "Cosmic",
            factory: starfield::WarpStarfield::boxed,
            hover_gated: false,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Plasma Waves",
            category: "Plasma",
            factory: plasma::PlasmaWaves::boxed,
            hover_gated: false,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Flow Field",
            category: "Fluid",
            factory: flow_field::FlowField::boxed,
            hover_gated: true,
            follows_speed: true,
        },
        EffectDescriptor {
            name: "Fractal Tree",
            category: "Fractals",
            factory: fractal_tree::FractalTree::boxed,
            hover_gated: false,
            follows_speed: false,
        },
    ]
}

pub fn registry() -> Result<Registry, RegistryError> {
    Registry::new(catalogue())
}
