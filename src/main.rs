use std::ptr;

use gtk::{glib, prelude::*};
use tracing_subscriber::EnvFilter;

mod mpv_gl_area;
use mpv_gl_area::MpvGLArea;

mod input;
mod media;
mod player;

use media::MediaStatus;

/// Media file to play, resolved relative to the working directory.
const MEDIA_PATH: &str = "my-long-video.mkv";

fn main() -> glib::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    load_gl();

    let application = gtk::Application::builder()
        .application_id("com.example.gtk-mpv-glarea")
        .build();
    application.connect_activate(build_ui);
    application.run()
}

/// Load GL pointers from epoxy (GL context management library used by GTK).
fn load_gl() {
    #[cfg(target_os = "macos")]
    let library = unsafe { libloading::os::unix::Library::new("libepoxy.0.dylib") }.unwrap();
    #[cfg(all(unix, not(target_os = "macos")))]
    let library = unsafe { libloading::os::unix::Library::new("libepoxy.so.0") }.unwrap();
    #[cfg(windows)]
    let library = libloading::os::windows::Library::open_already_loaded("libepoxy-0.dll")
        .or_else(|_| libloading::os::windows::Library::open_already_loaded("epoxy-0.dll"))
        .unwrap();

    epoxy::load_with(|name| {
        unsafe { library.get::<_>(name.as_bytes()) }
            .map(|symbol| *symbol)
            .unwrap_or(ptr::null())
    });

    // The render handler queries framebuffer state through the gl crate, so
    // resolve those entry points through epoxy as well.
    gl::load_with(|name| epoxy::get_proc_addr(name));
}

fn build_ui(application: &gtk::Application) {
    let window = gtk::ApplicationWindow::new(application);
    window.set_default_size(600, 400);

    let area = MpvGLArea::default();
    let frame = gtk::Frame::new(None);
    frame.set_child(Some(&area));
    window.set_child(Some(&frame));

    // Playback can only start once the GL surface exists, so the media path
    // is resolved when the area realizes. A missing file only changes the
    // window title.
    let win = window.downgrade();
    area.connect_realize(move |area| {
        let Some(window) = win.upgrade() else { return };
        window.set_default_size(1920, 1080);

        let status = MediaStatus::resolve(MEDIA_PATH);
        window.set_title(Some(status.title()));
        if let MediaStatus::Found { .. } = status {
            area.play(MEDIA_PATH);
        }
    });

    window.present();
}
