use flock_core::{Agent, Bounds, FlockSimulator, RuleParameters, Vector2D};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Element, HtmlCanvasElement, MouseEvent, TouchEvent};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console)]
    fn log(s: &str);
}

macro_rules! console_log {
    ($($t:tt)*) => (log(&format_args!($($t)*).to_string()))
}

/// Parameters passed from JS, remembered so a resize can rebuild the flock.
#[derive(Clone, Copy)]
struct Overrides {
    params: RuleParameters,
    max_speed_set: bool,
}

impl Overrides {
    fn from_js(config: JsValue) -> Result<Option<Self>, JsValue> {
        if config.is_undefined() || config.is_null() {
            return Ok(None);
        }

        let max_speed_set = js_sys::Reflect::has(&config, &"maxSpeed".into())?;
        let params: RuleParameters = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("invalid flock config: {}", e)))?;

        Ok(Some(Self {
            params,
            max_speed_set,
        }))
    }
}

/// Viewport speed policy first, then any explicit overrides on top.
fn parameters_for(width: f64, overrides: Option<Overrides>) -> RuleParameters {
    let policy = RuleParameters::for_viewport_width(width as f32);
    match overrides {
        Some(o) if o.max_speed_set => o.params,
        Some(o) => RuleParameters {
            max_speed: policy.max_speed,
            ..o.params
        },
        None => policy,
    }
}

fn build_flock(
    width: f64,
    height: f64,
    agent_count: usize,
    overrides: Option<Overrides>,
) -> Result<FlockSimulator, JsValue> {
    let params = parameters_for(width, overrides);
    FlockSimulator::new(
        agent_count,
        Bounds::new(width as f32, height as f32),
        params,
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub struct FlockCanvas {
    flock: FlockSimulator,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    overrides: Option<Overrides>,
}

#[wasm_bindgen]
impl FlockCanvas {
    /// `config` is an optional object using the camelCase parameter names,
    /// e.g. `{ visualRange: 70, avoidFactorMouse: 0.05 }`.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas_id: &str,
        width: f64,
        height: f64,
        agent_count: usize,
        config: JsValue,
    ) -> Result<FlockCanvas, JsValue> {
        console_log!("Initializing flock with {} agents", agent_count);

        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        let overrides = Overrides::from_js(config)?;
        let flock = build_flock(width, height, agent_count, overrides)?;

        Ok(FlockCanvas {
            flock,
            canvas,
            context,
            overrides,
        })
    }

    pub fn update(&mut self) {
        self.flock.step();
    }

    pub fn render(&self) -> Result<(), JsValue> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;

        self.context.set_fill_style_str("#0a0a0a");
        self.context.fill_rect(0.0, 0.0, width, height);

        for agent in self.flock.agents() {
            self.draw_agent(agent)?;
        }

        Ok(())
    }

    /// One animation frame: step, then draw.
    pub fn tick(&mut self) -> Result<(), JsValue> {
        self.update();
        self.render()
    }

    fn draw_agent(&self, agent: &Agent) -> Result<(), JsValue> {
        let size = self.flock.bounds().margin as f64;

        self.context.save();
        self.context
            .translate(agent.position.x as f64, agent.position.y as f64)?;
        self.context.rotate(agent.heading as f64)?;

        self.context.begin_path();
        self.context.move_to(size, 0.0);
        self.context.line_to(-size / 2.0, size / 2.0);
        self.context.line_to(-size / 2.0, -size / 2.0);
        self.context.close_path();

        let normalized_speed = (agent.speed() / self.flock.parameters().max_speed).min(1.0);
        let hue = 180.0 + normalized_speed * 60.0;
        self.context
            .set_fill_style_str(&format!("hsl({}, 70%, 60%)", hue));
        self.context.fill();

        self.context.restore();

        Ok(())
    }

    /// Pointer position in canvas coordinates.
    pub fn set_pointer(&mut self, x: f64, y: f64) {
        self.flock
            .set_repulsor(Some(Vector2D::new(x as f32, y as f32)));
    }

    pub fn clear_pointer(&mut self) {
        self.flock.clear_repulsor();
    }

    pub fn handle_mouse_move(&mut self, event: MouseEvent) {
        let (x, y) = self.to_canvas(event.client_x(), event.client_y());
        self.set_pointer(x, y);
    }

    pub fn handle_touch_move(&mut self, event: TouchEvent) {
        if let Some(touch) = event.touches().item(0) {
            let (x, y) = self.to_canvas(touch.client_x(), touch.client_y());
            self.set_pointer(x, y);
        }
    }

    pub fn handle_pointer_leave(&mut self) {
        self.clear_pointer();
    }

    /// Resizes the canvas and respawns the flock for the new viewport.
    pub fn resize(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        let flock = build_flock(width, height, self.flock.len(), self.overrides)?;
        let repulsor = self.flock.repulsor();

        self.canvas.set_width(width as u32);
        self.canvas.set_height(height as u32);
        self.flock = flock;
        self.flock.set_repulsor(repulsor);

        console_log!(
            "Resized to {}x{}, max speed {}",
            width,
            height,
            self.flock.parameters().max_speed
        );
        Ok(())
    }

    pub fn agent_count(&self) -> usize {
        self.flock.len()
    }

    pub fn max_speed(&self) -> f32 {
        self.flock.parameters().max_speed
    }

    /// Flat `[x, y, heading, ...]` buffer for renderers living in JS.
    pub fn positions(&self) -> js_sys::Float32Array {
        let data: Vec<f32> = self
            .flock
            .agents()
            .iter()
            .flat_map(|a| [a.position.x, a.position.y, a.heading])
            .collect();
        js_sys::Float32Array::from(data.as_slice())
    }

    fn to_canvas(&self, client_x: i32, client_y: i32) -> (f64, f64) {
        let canvas_element: &Element = self.canvas.as_ref();
        let rect = canvas_element.get_bounding_client_rect();
        (client_x as f64 - rect.left(), client_y as f64 - rect.top())
    }
}
