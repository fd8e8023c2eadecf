mod imp;

use gtk::glib;
use gtk::subclass::prelude::*;

glib::wrapper! {
    pub struct MpvGLArea(ObjectSubclass<imp::MpvGLArea>)
        @extends gtk::GLArea, gtk::Widget;
}

impl Default for MpvGLArea {
    fn default() -> Self {
        glib::Object::new()
    }
}

impl MpvGLArea {
    /// Start playback of `path` on the embedded player.
    pub fn play(&self, path: &str) {
        self.imp().play(path);
    }
}
