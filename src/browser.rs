// Drives an Animation from the browser: requestAnimationFrame for the loop,
// a window resize listener for the bounds.

use crate::animation::{Animation, LoopState};
use crate::config::FieldConfig;
use crate::error::MountError;
use crate::field::ParticleField;
use crate::surface::CanvasSurface;
use crate::utils::Timer;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type FrameCallback = Closure<dyn FnMut(f64)>;

pub struct BrowserLoop {
    window: Window,
    animation: Rc<RefCell<Animation<CanvasSurface>>>,
    pending_frame: Rc<Cell<Option<i32>>>,
    // The frame callback holds a handle to this slot so it can reschedule
    // itself. stop() empties the slot to break the cycle.
    frame_callback: Rc<RefCell<Option<FrameCallback>>>,
    resize_callback: Option<Closure<dyn FnMut()>>,
}

impl BrowserLoop {
    pub fn mount(canvas_id: &str, config: FieldConfig) -> Result<BrowserLoop, MountError> {
        let window = web_sys::window().ok_or(MountError::NoWindow)?;
        let canvas = find_canvas(&window, canvas_id)?;
        let browser_loop = BrowserLoop::attach(window, canvas.clone(), config).map_err(|err| {
            // nothing will be drawn, so keep the element out of the page
            let _ = canvas.set_attribute("hidden", "");
            err
        })?;

        let (width, height) = browser_loop.animation.borrow().field().size();
        log::info!(
            "particle background mounted on #{} at {}x{}",
            canvas_id,
            width,
            height
        );
        Ok(browser_loop)
    }

    fn attach(
        window: Window,
        canvas: HtmlCanvasElement,
        config: FieldConfig,
    ) -> Result<BrowserLoop, MountError> {
        let surface = CanvasSurface::new(canvas)?;
        let (width, height) = viewport_size(&window)?;
        let profile = config.profile;
        let field = ParticleField::new(width, height, config);
        let animation = Rc::new(RefCell::new(Animation::new(field, surface)));
        let pending_frame = Rc::new(Cell::new(None));
        let frame_callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        {
            let animation = animation.clone();
            let pending_frame = pending_frame.clone();
            let window = window.clone();
            let this_callback = frame_callback.clone();
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp: f64| {
                pending_frame.set(None);
                let again = {
                    let _timer = if profile {
                        Some(Timer::new("ParticleField::frame"))
                    } else {
                        None
                    };
                    animation.borrow_mut().frame(timestamp)
                };
                if !again {
                    return;
                }
                if let Some(callback) = this_callback.borrow().as_ref() {
                    match request_frame(&window, callback) {
                        Ok(id) => pending_frame.set(Some(id)),
                        Err(err) => log::warn!("could not schedule next frame: {}", err),
                    }
                }
            }) as Box<dyn FnMut(f64)>));
        }

        let resize_callback = {
            let animation = animation.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || match viewport_size(&window) {
                Ok((width, height)) => animation.borrow_mut().resize(width, height),
                Err(err) => log::warn!("ignoring resize: {}", err),
            }) as Box<dyn FnMut()>)
        };

        // From here on dropping the loop cleans up whatever was registered.
        let mut browser_loop = BrowserLoop {
            window,
            animation,
            pending_frame,
            frame_callback,
            resize_callback: None,
        };
        browser_loop
            .window
            .add_event_listener_with_callback("resize", resize_callback.as_ref().unchecked_ref())?;
        browser_loop.resize_callback = Some(resize_callback);
        browser_loop.start()?;
        Ok(browser_loop)
    }

    fn start(&mut self) -> Result<(), MountError> {
        if !self.animation.borrow_mut().start() {
            return Ok(());
        }
        if let Some(callback) = self.frame_callback.borrow().as_ref() {
            self.pending_frame
                .set(Some(request_frame(&self.window, callback)?));
        }
        Ok(())
    }

    /// Cancels the pending frame and drops both callbacks. Idempotent.
    pub fn stop(&mut self) {
        self.animation.borrow_mut().stop();
        if let Some(id) = self.pending_frame.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {:?}", err);
            }
        }
        if let Some(callback) = self.resize_callback.take() {
            if let Err(err) = self
                .window
                .remove_event_listener_with_callback("resize", callback.as_ref().unchecked_ref())
            {
                log::warn!("could not remove resize listener: {:?}", err);
            }
        }
        self.frame_callback.borrow_mut().take();
    }

    pub fn is_running(&self) -> bool {
        self.animation.borrow().state() == LoopState::Running
    }

    pub fn frame_count(&self) -> u64 {
        self.animation.borrow().frame_count()
    }

    pub fn frame_rate(&self) -> f64 {
        self.animation.borrow().frame_rate()
    }
}

impl Drop for BrowserLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn find_canvas(window: &Window, canvas_id: &str) -> Result<HtmlCanvasElement, MountError> {
    let document = window.document().ok_or(MountError::NoDocument)?;
    document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| MountError::CanvasNotFound(canvas_id.to_owned()))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| MountError::NotACanvas(canvas_id.to_owned()))
}

fn viewport_size(window: &Window) -> Result<(u32, u32), MountError> {
    let width = window
        .inner_width()?
        .as_f64()
        .ok_or_else(|| MountError::Host("innerWidth is not a number".to_owned()))?;
    let height = window
        .inner_height()?
        .as_f64()
        .ok_or_else(|| MountError::Host("innerHeight is not a number".to_owned()))?;
    Ok((width.max(0.0) as u32, height.max(0.0) as u32))
}

fn request_frame(window: &Window, callback: &FrameCallback) -> Result<i32, MountError> {
    let id = window.request_animation_frame(callback.as_ref().unchecked_ref::<js_sys::Function>())?;
    Ok(id)
}
