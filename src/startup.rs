// Startup module - banner and module status printed before serving
//
// Shows version, where configuration came from, which store leads go to,
// and which optional modules are on.

use crate::config::{Config, StoreBackend, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Module loading result for display
pub struct ModuleStatus {
    pub name: &'static str,
    pub enabled: bool,
    pub description: String,
}

/// Print the startup banner and module status
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}{}{RESET} {DIM}v{VERSION}{RESET}", config.site.name);
    println!("  {DIM}Landing page and lead capture{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }
    println!();

    println!("  {DIM}Loading modules...{RESET}");
    for module in module_status(config) {
        print_module_status(&module);
    }
    println!();

    println!(
        "  {MAGENTA}▸{RESET} Serving on {BOLD}http://{}{RESET}",
        config.bind_addr
    );
    if config.demo_mode {
        println!("  {YELLOW}▸{RESET} {YELLOW}Demo mode active{RESET} {DIM}(leads kept in memory){RESET}");
    }
    println!();
}

/// Status of each module based on config
pub fn module_status(config: &Config) -> Vec<ModuleStatus> {
    let store_description = match config.effective_backend() {
        StoreBackend::Rest => format!("REST insert into '{}'", config.store.table),
        StoreBackend::Memory => "In-memory (not persisted)".to_string(),
    };

    vec![
        ModuleStatus {
            name: "web",
            enabled: true,
            description: "Landing page + form".to_string(),
        },
        ModuleStatus {
            name: "store",
            enabled: true,
            description: store_description,
        },
        ModuleStatus {
            name: "audit",
            enabled: config.features.audit_log,
            description: "JSONL submission log".to_string(),
        },
        ModuleStatus {
            name: "file-log",
            enabled: config.logging.file_enabled,
            description: "Rolling JSON trace files".to_string(),
        },
    ]
}

fn print_module_status(module: &ModuleStatus) {
    use colors::*;

    let (icon, style) = if module.enabled {
        (format!("{GREEN}✓{RESET}"), "")
    } else {
        (format!("{DIM}○{RESET}"), DIM)
    };

    println!(
        "    {icon} {style}{:<10}{RESET} {DIM}{}{RESET}",
        module.name, module.description
    );
}
