use glam::Vec3;
use springbox_core::{
    Body, BodyId, Environment, FieldPlatform, PhysicsEvent, PolyFlags, Solver, TileGrid,
    WorldPolygon, MAX_PARTICLES,
};
use wasm_bindgen::prelude::*;

/// GPU-compatible particle struct: 32 bytes, matches the WGSL vertex layout.
/// `previous` is the position at the start of the frame, for interpolation.
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct GpuParticle {
    position: [f32; 3], // 12 bytes
    body: u32,          //  4 bytes
    previous: [f32; 3], // 12 bytes
    _pad: f32,          //  4 bytes
}

#[wasm_bindgen]
pub struct PhysicsWorld {
    solver: Solver,
    grid: TileGrid,
    pending_polygons: Vec<WorldPolygon>,
    fields: Vec<Option<FieldPlatform>>,
    gpu_buffer: Vec<GpuParticle>,
    /// Flattened `[body_id, kind, strength, volume]` per event of the last step.
    last_events: Vec<f32>,
}

#[wasm_bindgen]
impl PhysicsWorld {
    /// World covering `extent_x` x `extent_z` units with square tiles.
    #[wasm_bindgen(constructor)]
    pub fn new(tile_size: f32, extent_x: f32, extent_z: f32) -> PhysicsWorld {
        let grid = TileGrid::covering(tile_size, extent_x, extent_z);
        web_sys::console::log_1(
            &format!(
                "WASM PhysicsWorld created: {} world units per tile, {}x{} extent",
                grid.tile_size(),
                extent_x,
                extent_z
            )
            .into(),
        );

        PhysicsWorld {
            solver: Solver::default(),
            grid,
            pending_polygons: Vec::new(),
            fields: Vec::new(),
            gpu_buffer: Vec::new(),
            last_events: Vec::new(),
        }
    }

    /// Add a body from flat `[x, y, z, ...]` rest positions. Returns its id.
    #[wasm_bindgen]
    pub fn add_body(
        &mut self,
        positions: &[f32],
        mass: f32,
        radius: f32,
        owner: Option<u32>,
    ) -> Result<u32, JsError> {
        let points: Vec<Vec3> = positions
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        let body = Body::from_points(&points, mass, radius)?;
        let id = self
            .solver
            .add_body(body, owner.map(springbox_core::EntityHandle));
        self.write_gpu_output();
        Ok(id.index() as u32)
    }

    #[wasm_bindgen]
    pub fn remove_body(&mut self, id: u32) -> bool {
        let removed = self.find(id).and_then(|id| self.solver.remove_body(id));
        self.write_gpu_output();
        removed.is_some()
    }

    /// Push one particle of a body during its next substep. Wakes the body.
    #[wasm_bindgen]
    pub fn push(&mut self, id: u32, particle: usize, x: f32, y: f32, z: f32) -> bool {
        let Some(body) = self.find(id).and_then(|id| self.solver.body_mut(id)) else {
            return false;
        };
        body.wake();
        body.apply_impulse(particle, Vec3::new(x, y, z))
    }

    /// Queue a static triangle or quad; `vertices` holds 9 or 12 floats.
    /// Takes effect on the next `rebuild_geometry`.
    #[wasm_bindgen]
    pub fn add_polygon(&mut self, vertices: &[f32], flags: u32) -> bool {
        let v: Vec<Vec3> = vertices
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        let flags = PolyFlags::from_bits_truncate(flags);
        let polygon = match v.as_slice() {
            [a, b, c] => WorldPolygon::triangle(*a, *b, *c, flags),
            [a, b, c, d] => WorldPolygon::quad(*a, *b, *c, *d, flags),
            _ => return false,
        };
        self.pending_polygons.push(polygon);
        true
    }

    #[wasm_bindgen]
    pub fn rebuild_geometry(&mut self) {
        self.grid.build(&self.pending_polygons);
    }

    #[wasm_bindgen]
    pub fn clear_geometry(&mut self) {
        self.pending_polygons.clear();
        self.grid.build(&[]);
    }

    /// Register a box-shaped field platform. Returns its slot.
    #[wasm_bindgen]
    pub fn add_field(&mut self, min_x: f32, min_y: f32, min_z: f32, max_x: f32, max_y: f32, max_z: f32) -> u32 {
        let platform = FieldPlatform::new(
            Vec3::new(min_x, min_y, min_z),
            Vec3::new(max_x, max_y, max_z),
        );
        let slot = match self.fields.iter().position(Option::is_none) {
            Some(slot) => {
                self.fields[slot] = Some(platform);
                slot
            }
            None => {
                self.fields.push(Some(platform));
                self.fields.len() - 1
            }
        };
        slot as u32
    }

    #[wasm_bindgen]
    pub fn remove_field(&mut self, slot: usize) {
        if let Some(field) = self.fields.get_mut(slot) {
            *field = None;
        }
    }

    /// Advance every body by one frame. Returns elapsed milliseconds.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32, rubber: f32) -> f32 {
        let start = js_sys::Date::now();
        let env = Environment::empty()
            .with_geometry(&self.grid)
            .with_fields(&self.fields);
        let events = self.solver.step(dt, rubber, &env);

        self.last_events.clear();
        for (id, event) in events {
            let (kind, strength, volume) = match event {
                PhysicsEvent::Impact(impact) => (0.0, impact.strength, impact.volume),
                PhysicsEvent::Settled => (1.0, 0.0, 0.0),
            };
            self.last_events
                .extend_from_slice(&[id.index() as f32, kind, strength, volume]);
        }

        self.write_gpu_output();
        let elapsed = js_sys::Date::now() - start;
        elapsed as f32
    }

    #[wasm_bindgen]
    pub fn events(&self) -> Vec<f32> {
        self.last_events.clone()
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_ptr(&self) -> *const f32 {
        self.gpu_buffer.as_ptr() as *const f32
    }

    #[wasm_bindgen]
    pub fn get_gpu_buffer_byte_length(&self) -> usize {
        std::mem::size_of_val(self.gpu_buffer.as_slice())
    }

    #[wasm_bindgen]
    pub fn body_count(&self) -> usize {
        self.solver.len()
    }

    #[wasm_bindgen]
    pub fn active_body_count(&self) -> usize {
        self.solver.active_count()
    }

    #[wasm_bindgen]
    pub fn max_particles_per_body() -> usize {
        MAX_PARTICLES
    }

    #[wasm_bindgen]
    pub fn set_time_scale(&mut self, time_scale: f32) {
        self.solver.config.time_scale = time_scale;
    }

    #[wasm_bindgen]
    pub fn set_gravity(&mut self, x: f32, y: f32, z: f32) {
        self.solver.config.gravity = Vec3::new(x, y, z);
    }
}

impl PhysicsWorld {
    fn find(&self, id: u32) -> Option<BodyId> {
        self.solver.ids().find(|b| b.index() == id as usize)
    }

    fn write_gpu_output(&mut self) {
        self.gpu_buffer.clear();
        for id in self.solver.ids() {
            let Some(body) = self.solver.body(id) else {
                continue;
            };
            for p in body.particles() {
                self.gpu_buffer.push(GpuParticle {
                    position: p.position.to_array(),
                    body: id.index() as u32,
                    previous: p.frame_start.to_array(),
                    _pad: 0.0,
                });
            }
        }
    }
}
