use std::ffi::c_void;

use libmpv2::render::{OpenGLInitParams, RenderContext, RenderParam, RenderParamApiType};
use libmpv2::Mpv;

#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    #[error("mpv error: {0}")]
    Mpv(#[from] libmpv2::Error),
}

pub type Result<T> = std::result::Result<T, PlayerError>;

/// Opaque context handed to mpv's proc-address resolver. Unit, since epoxy
/// resolves GL symbols globally.
pub struct GlContext;

fn get_proc_address(_ctx: &GlContext, name: &str) -> *mut c_void {
    epoxy::get_proc_addr(name) as *mut c_void
}

/// Owns the mpv handle and, once the GL surface is realized, its render
/// context.
///
/// Field order matters: `render_ctx` is declared before `mpv` so that on
/// drop the render context is freed before the handle is terminated.
pub struct Player {
    render_ctx: Option<RenderContext>,
    mpv: Mpv,
}

impl Player {
    /// Create the mpv handle. Default input bindings, keyboard-driven
    /// seeking and the on-screen controller are enabled; drawing goes
    /// through the render API.
    pub fn new() -> Result<Self> {
        enforce_mpv_locale();

        let mpv = Mpv::with_initializer(|init| {
            init.set_option("input-default-bindings", true)?;
            init.set_option("input-vo-keyboard", true)?;
            init.set_option("osc", true)?;
            init.set_option("vo", "libmpv")?;
            Ok(())
        })?;

        Ok(Self {
            render_ctx: None,
            mpv,
        })
    }

    /// Build the OpenGL render context and register the frame-update
    /// callback. Must be called with the widget's GL context current.
    ///
    /// mpv invokes `update_cb` from one of its own threads; the callback
    /// must not touch GL or toolkit state directly.
    pub fn create_render_context<F>(&mut self, update_cb: F) -> Result<()>
    where
        F: Fn() + Send + 'static,
    {
        let render_params = vec![
            RenderParam::ApiType(RenderParamApiType::OpenGl),
            RenderParam::InitParams(OpenGLInitParams {
                get_proc_address,
                ctx: GlContext,
            }),
        ];

        // SAFETY: the handle is valid for the lifetime of self, and the GL
        // context is current per this function's contract.
        let mut ctx = unsafe { RenderContext::new(self.mpv.ctx.as_mut(), render_params.into_iter())? };
        ctx.set_update_callback(update_cb);
        self.render_ctx = Some(ctx);
        Ok(())
    }

    /// Render the current frame into `fbo` at the given pixel size, flipped
    /// to match the toolkit's coordinate system. Returns whether rendering
    /// occurred.
    pub fn render(&self, fbo: i32, width: i32, height: i32) -> Result<bool> {
        match &self.render_ctx {
            Some(ctx) => {
                ctx.render::<GlContext>(fbo, width, height, true)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn play(&self, path: &str) -> Result<()> {
        self.mpv.command("loadfile", &[path, "replace"])?;
        Ok(())
    }

    pub fn mouse_moved(&self, x: i64, y: i64) -> Result<()> {
        self.mpv.command("mouse", &[&x.to_string(), &y.to_string()])?;
        Ok(())
    }

    pub fn mouse_key(&self, key: &str, pressed: bool) -> Result<()> {
        let cmd = if pressed { "keydown" } else { "keyup" };
        self.mpv.command(cmd, &[key])?;
        Ok(())
    }

    /// Free the render context ahead of handle termination. Termination
    /// itself happens when the `Player` is dropped.
    pub fn release_render_context(&mut self) {
        self.render_ctx = None;
    }
}

/// libmpv refuses to initialize unless `LC_NUMERIC` is "C", and GTK applies
/// the user's locale during startup, so re-pin it right before touching mpv.
fn enforce_mpv_locale() {
    let locale = unsafe { libc::setlocale(libc::LC_NUMERIC, b"C\0".as_ptr().cast()) };
    if locale.is_null() {
        tracing::warn!("could not set LC_NUMERIC=C; mpv may reject options");
    }
}
