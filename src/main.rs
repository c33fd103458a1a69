use std::cell::RefCell;
use std::error::Error;
use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;

use veneer::{
    CellGrid, GridTagDelegate, MapGrid, ProxyTypes, SharedGrid, effective_mass_multiplier,
};
use veneer_blocks::registry::BlockRegistry;
use veneer_proxy::ResourceStack;
use veneer_proxy::context::{LookupScope, try_resolve_tag};
use veneer_proxy::entity::CellCoord;
use veneer_proxy::mass::MassDelegation;
use veneer_sync::{ClientReplica, RenderInvalidator, SyncChannel};

#[derive(Parser)]
#[command(
    name = "veneer",
    about = "Copy a material into a proxy frame and inspect the result"
)]
struct Args {
    /// Directory holding sprites.toml and blocks.toml
    #[arg(long, default_value = "assets/voxels")]
    assets: PathBuf,
    /// Material block to copy into the frame
    #[arg(long, default_value = "stone")]
    material: String,
    /// Extra re-applications; each one advances the virtual rotation
    #[arg(long, default_value_t = 0)]
    rotations: u32,
}

#[derive(Default)]
struct CountingSink {
    cells: usize,
}

impl RenderInvalidator for CountingSink {
    fn mark_geometry_dirty(&mut self, coord: CellCoord) {
        log::debug!("re-render ({}, {}, {})", coord.x, coord.y, coord.z);
        self.cells += 1;
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let registry = BlockRegistry::load_from_paths(
        args.assets.join("sprites.toml"),
        args.assets.join("blocks.toml"),
    )?;
    let proxy_types = ProxyTypes::from_registry(&registry);
    log::info!(
        "registry: {} block type(s), {} proxy-capable",
        registry.blocks.len(),
        proxy_types.len()
    );

    let frame = registry
        .make_block_by_name("frame", None)
        .ok_or("catalog has no 'frame' block")?;
    let material = registry
        .make_block_by_name(&args.material, None)
        .ok_or_else(|| format!("unknown material '{}'", args.material))?;

    let grid: SharedGrid = Rc::new(RefCell::new(MapGrid::new()));
    let coord = CellCoord::new(0, 0, 0);
    grid.borrow_mut().place(coord, frame, &registry);

    {
        let mut g = grid.borrow_mut();
        let entity = g
            .entity_mut(coord)
            .ok_or("frame cell did not register as a proxy")?;
        entity
            .set_material(material, ResourceStack::one(&args.material), &registry)
            .map_err(|r| r.to_string())?;
        for _ in 0..args.rotations {
            entity
                .set_material(material, ResourceStack::one(&args.material), &registry)
                .map_err(|r| r.to_string())?;
        }
    }

    // One server tick: sweep dirty entities, replicate, re-render.
    let mut channel = SyncChannel::new();
    for entity in grid.borrow_mut().entities_mut() {
        channel.collect(entity, &registry);
    }
    let batch = channel.flush();
    let mut replica = ClientReplica::new();
    replica.apply_batch(&batch, &registry);
    let mut sink = CountingSink::default();
    replica.renders().drain(&mut sink);

    let masses = MassDelegation::new(None);
    {
        let g = grid.borrow();
        let entity = g.entity(coord).ok_or("proxy entity vanished")?;
        println!(
            "frame copying {} (rotation {}): effective mass {:.1}, hardness {:.2}, multiplier {:.2}",
            args.material,
            entity.virtual_rotation(),
            masses.effective_mass(entity, &registry),
            masses.effective_hardness(entity, &registry),
            effective_mass_multiplier(&*g, coord, &registry).unwrap_or(1.0),
        );
    }
    println!(
        "sync: {} update(s) replicated, {} cell(s) invalidated",
        batch.len(),
        sink.cells
    );

    // A host tag query resolving through the copied material.
    let delegate = GridTagDelegate::new(grid.clone());
    let _scope = LookupScope::enter(delegate, coord);
    if let Some(hit) = try_resolve_tag(&registry, "stone") {
        println!("tag 'stone' through the proxy: {hit}");
    }
    Ok(())
}
