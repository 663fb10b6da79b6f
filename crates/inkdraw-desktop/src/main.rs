#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

fn main() {
    // Set app_id for Wayland - must be done BEFORE GTK init
    #[cfg(target_os = "linux")]
    {
        gtk::glib::set_prgname(Some("ink.draw.InkDraw"));
        gtk::glib::set_application_name("InkDraw");
    }

    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|arg| arg == "--help" || arg == "-h") {
        println!("inkdraw-desktop - Always-on-top drawing overlay");
        println!();
        println!("USAGE:");
        println!("    inkdraw-desktop [OPTIONS]");
        println!();
        println!("OPTIONS:");
        println!("    -h, --help      Print this help message");
        println!();
        println!("GLOBAL SHORTCUTS (defaults, configurable from the canvas):");
        println!(
            "    {:<16}Hide to tray",
            inkdraw_core::shortcuts::DEFAULT_HIDE_TO_TRAY
        );
        println!(
            "    {:<16}Show from tray",
            inkdraw_core::shortcuts::DEFAULT_SHOW_FROM_TRAY
        );
        println!();
        println!("Launching again while InkDraw runs focuses the running instance.");
        return;
    }

    inkdraw_desktop::logging::init();

    if let Err(err) = inkdraw_desktop::run() {
        tracing::error!(%err, "inkdraw-desktop exited with an error");
        std::process::exit(1);
    }
}
