use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

const HOST_NAME: &str = "com.llmtonotes.host";
const BINARY_NAME: &str = "llm-notes-host";

fn main() {
    println!("cargo:rerun-if-env-changed=LLM_NOTES_EXTENSION_ID");

    let workspace_root = Path::new(&env::var("CARGO_MANIFEST_DIR").unwrap())
        .ancestors()
        .nth(1)
        .unwrap()
        .to_path_buf();

    // Create .dev directory in workspace root if it doesn't exist
    let dev_dir = workspace_root.join(".dev");

    if let Err(e) = fs::create_dir_all(&dev_dir) {
        println!("cargo:warning=Error creating .dev directory: {}", e);
        return;
    }

    let binary_file = if env::var("CARGO_CFG_WINDOWS").is_ok() {
        format!("{}.exe", BINARY_NAME)
    } else {
        BINARY_NAME.to_string()
    };
    let binary_path = workspace_root
        .join("target")
        .join(env::var("PROFILE").unwrap())
        .join(binary_file)
        .to_str()
        .unwrap()
        .to_string();

    let extension_id =
        env::var("LLM_NOTES_EXTENSION_ID").unwrap_or_else(|_| "YOUR_EXTENSION_ID".to_string());

    let manifest = serde_json::json!({
        "name": HOST_NAME,
        "description": "Native messaging host for the LLM to Notes extension.",
        "path": binary_path,
        "type": "stdio",
        "allowed_origins": [format!("chrome-extension://{}/", extension_id)]
    });

    let manifest_path = dev_dir.join(format!("{}.json", HOST_NAME));
    let mut file = File::create(&manifest_path).unwrap();
    file.write_all(serde_json::to_string_pretty(&manifest).unwrap().as_bytes())
        .unwrap();
}
