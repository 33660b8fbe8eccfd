fn main() {
    if cfg!(target_os = "windows") {
        // The icon is optional; skip resource compilation when it is missing.
        if std::path::Path::new("icon.ico").exists() {
            let mut res = winres::WindowsResource::new();
            res.set_icon("icon.ico");
            if let Err(err) = res.compile() {
                println!("cargo:warning=failed to embed window icon: {err}");
            }
        }
    }
}
