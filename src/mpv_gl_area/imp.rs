use std::cell::RefCell;

use gtk::{gdk, glib, prelude::*, subclass::prelude::*};

use crate::input;
use crate::player::Player;

#[derive(Default)]
pub struct MpvGLArea {
    player: RefCell<Option<Player>>,
}

#[glib::object_subclass]
impl ObjectSubclass for MpvGLArea {
    const NAME: &'static str = "MpvGLArea";
    type Type = super::MpvGLArea;
    type ParentType = gtk::GLArea;
}

impl ObjectImpl for MpvGLArea {
    fn constructed(&self) {
        self.parent_constructed();

        match Player::new() {
            Ok(player) => *self.player.borrow_mut() = Some(player),
            Err(err) => tracing::error!("failed to create mpv handle: {}", err),
        }

        let widget = self.obj();

        let motion = gtk::EventControllerMotion::new();
        {
            let area = widget.downgrade();
            motion.connect_motion(move |_, x, y| {
                if let Some(area) = area.upgrade() {
                    area.imp().forward_pointer(x, y);
                }
            });
        }
        widget.add_controller(motion);

        // Listen on every button; unmapped ones leave the gesture unclaimed.
        let click = gtk::GestureClick::builder().button(0).build();
        {
            let area = widget.downgrade();
            click.connect_pressed(move |gesture, _n_press, _x, _y| {
                if let Some(area) = area.upgrade() {
                    area.imp().forward_button(gesture, true);
                }
            });
        }
        {
            let area = widget.downgrade();
            click.connect_released(move |gesture, _n_press, _x, _y| {
                if let Some(area) = area.upgrade() {
                    area.imp().forward_button(gesture, false);
                }
            });
        }
        widget.add_controller(click);

        widget.connect_resize(|area, _width, _height| area.queue_render());
    }
}

impl WidgetImpl for MpvGLArea {
    fn realize(&self) {
        self.parent_realize();

        let widget = self.obj();
        if widget.error().is_some() {
            return;
        }
        widget.make_current();

        let mut guard = self.player.borrow_mut();
        let Some(player) = guard.as_mut() else {
            tracing::error!("no mpv handle to bind a render context to");
            return;
        };

        // mpv fires the update callback from its own thread. GL and toolkit
        // state must only be touched on the main loop, so hop over to it at
        // high priority before requesting a redraw.
        let area = glib::SendWeakRef::from(widget.downgrade());
        let result = player.create_render_context(move || {
            let area = area.clone();
            glib::idle_add_full(glib::Priority::HIGH, move || {
                if let Some(area) = area.upgrade() {
                    area.queue_render();
                }
                glib::ControlFlow::Break
            });
        });
        if let Err(err) = result {
            tracing::error!("failed to create mpv render context: {}", err);
        }
    }

    fn unrealize(&self) {
        if let Some(mut player) = self.player.borrow_mut().take() {
            self.obj().make_current();
            // Render-context teardown must precede handle termination;
            // dropping the player afterwards terminates the handle.
            player.release_render_context();
        }

        self.parent_unrealize();
    }
}

impl GLAreaImpl for MpvGLArea {
    fn render(&self, _context: &gdk::GLContext) -> glib::Propagation {
        if let Some(player) = &*self.player.borrow() {
            let widget = self.obj();
            let scale = widget.scale_factor();
            let width = widget.width() * scale;
            let height = widget.height() * scale;

            let mut fbo = 0;
            // SAFETY: called with the widget's GL context current.
            unsafe { gl::GetIntegerv(gl::DRAW_FRAMEBUFFER_BINDING, &mut fbo) };

            match player.render(fbo, width, height) {
                Ok(true) => return glib::Propagation::Stop,
                Ok(false) => {}
                Err(err) => tracing::error!("mpv render failed: {}", err),
            }
        }

        glib::Propagation::Proceed
    }
}

impl MpvGLArea {
    pub(super) fn play(&self, path: &str) {
        match &*self.player.borrow() {
            Some(player) => {
                if let Err(err) = player.play(path) {
                    tracing::error!("failed to start playback: {}", err);
                }
            }
            None => tracing::warn!("play requested without an mpv handle"),
        }
    }

    fn forward_pointer(&self, x: f64, y: f64) {
        let (x, y) = input::scale_pointer(x, y, self.obj().scale_factor());
        if let Some(player) = &*self.player.borrow() {
            if let Err(err) = player.mouse_moved(x, y) {
                tracing::warn!("failed to forward pointer position: {}", err);
            }
        }
    }

    fn forward_button(&self, gesture: &gtk::GestureClick, pressed: bool) {
        let Some(key) = input::button_key(gesture.current_button()) else {
            return;
        };
        if let Some(player) = &*self.player.borrow() {
            if let Err(err) = player.mouse_key(key, pressed) {
                tracing::warn!("failed to forward button event: {}", err);
            }
        }
        gesture.set_state(gtk::EventSequenceState::Claimed);
    }
}
