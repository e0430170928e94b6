//! `PhysicsWorld` on top of Matter.js
//!
//! Bodies live on the JS side in a registry array; Rust holds indices.
//! Expects the global `Matter` object to be loaded by the page.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::physics::PhysicsWorld;
use crate::sim::geometry::Rect;
use crate::sim::win::BodyLabel;

#[wasm_bindgen(inline_js = "
    let engine = null;
    let render = null;
    let runner = null;
    let bodies = [];
    let collisionListener = null;

    function detach_collision_listener() {
        if (engine && collisionListener) {
            Matter.Events.off(engine, 'collisionStart', collisionListener);
        }
        collisionListener = null;
    }

    export function matter_init(width, height, wireframes) {
        const { Engine, Render, Runner, World } = Matter;
        detach_collision_listener();
        if (render) {
            Render.stop(render);
            Runner.stop(runner);
            World.clear(engine.world);
            Engine.clear(engine);
            render.canvas.remove();
        }
        engine = Engine.create();
        engine.world.gravity.y = 0;
        render = Render.create({
            element: document.body,
            engine: engine,
            options: { wireframes, width, height },
        });
        Render.run(render);
        runner = Runner.create();
        Runner.run(runner, engine);
        bodies = [];
    }

    export function matter_rectangle(x, y, w, h, label) {
        const body = Matter.Bodies.rectangle(x, y, w, h, { isStatic: true, label });
        bodies.push(body);
        return bodies.length - 1;
    }

    export function matter_circle(x, y, r, label) {
        const body = Matter.Bodies.circle(x, y, r, { label });
        bodies.push(body);
        return bodies.length - 1;
    }

    export function matter_add(id) {
        Matter.Composite.add(engine.world, bodies[id]);
    }

    export function matter_set_velocity(id, x, y) {
        Matter.Body.setVelocity(bodies[id], { x, y });
    }

    export function matter_velocity_x(id) {
        return bodies[id].velocity.x;
    }

    export function matter_velocity_y(id) {
        return bodies[id].velocity.y;
    }

    export function matter_set_static(id, isStatic) {
        Matter.Body.setStatic(bodies[id], isStatic);
    }

    export function matter_set_gravity(x, y) {
        engine.world.gravity.x = x;
        engine.world.gravity.y = y;
    }

    export function matter_on_collision_start(callback) {
        detach_collision_listener();
        collisionListener = (event) => {
            for (const pair of event.pairs) {
                callback(pair.bodyA.label, pair.bodyB.label);
            }
        };
        Matter.Events.on(engine, 'collisionStart', collisionListener);
    }
")]
extern "C" {
    fn matter_init(width: f32, height: f32, wireframes: bool);
    fn matter_rectangle(x: f32, y: f32, w: f32, h: f32, label: &str) -> u32;
    fn matter_circle(x: f32, y: f32, r: f32, label: &str) -> u32;
    fn matter_add(id: u32);
    fn matter_set_velocity(id: u32, x: f32, y: f32);
    fn matter_velocity_x(id: u32) -> f32;
    fn matter_velocity_y(id: u32) -> f32;
    fn matter_set_static(id: u32, is_static: bool);
    fn matter_set_gravity(x: f32, y: f32);
    fn matter_on_collision_start(callback: &Closure<dyn FnMut(String, String)>);
}

/// Handle to the page's Matter.js engine
///
/// Only one engine exists per page; creating a new world tears down the
/// previous one along with its collision listener.
pub struct MatterWorld {
    /// Callback the JS listener calls into; must outlive the registration
    on_collision: Option<Closure<dyn FnMut(String, String)>>,
}

impl MatterWorld {
    /// Start a fresh engine, renderer and runner
    pub fn new(width: f32, height: f32, wireframes: bool) -> Self {
        matter_init(width, height, wireframes);
        log::info!("Matter.js world {}x{} created", width, height);
        Self { on_collision: None }
    }

    /// Forward every collision-start pair to `callback`
    ///
    /// Replaces any earlier callback. The closure is owned by this world and
    /// dropped with it; the next `matter_init` detaches the JS listener.
    pub fn on_collision_start(&mut self, callback: impl FnMut(String, String) + 'static) {
        let closure = Closure::<dyn FnMut(String, String)>::new(callback);
        matter_on_collision_start(&closure);
        self.on_collision = Some(closure);
    }
}

impl PhysicsWorld for MatterWorld {
    type Handle = u32;

    fn create_static_rectangle(&mut self, rect: &Rect, label: BodyLabel) -> u32 {
        matter_rectangle(
            rect.center.x,
            rect.center.y,
            rect.size.x,
            rect.size.y,
            label.as_str(),
        )
    }

    fn create_circle(&mut self, center: Vec2, radius: f32, label: BodyLabel) -> u32 {
        matter_circle(center.x, center.y, radius, label.as_str())
    }

    fn add_to_world(&mut self, handle: u32) {
        matter_add(handle);
    }

    fn set_velocity(&mut self, handle: u32, velocity: Vec2) {
        matter_set_velocity(handle, velocity.x, velocity.y);
    }

    fn velocity(&self, handle: u32) -> Vec2 {
        Vec2::new(matter_velocity_x(handle), matter_velocity_y(handle))
    }

    fn set_static(&mut self, handle: u32, is_static: bool) {
        matter_set_static(handle, is_static);
    }

    fn set_gravity(&mut self, gravity: Vec2) {
        matter_set_gravity(gravity.x, gravity.y);
    }
}
