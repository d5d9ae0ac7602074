#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
use pyo3::prelude::*;
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

mod ast;
pub mod compiler;
pub mod document;
pub mod error;
pub mod markup;
pub mod motion;
mod parser;
pub mod scope;
pub mod types;

pub use compiler::{compile, compile_text, CompileOptions, CompilerState, Mode};
pub use document::Document;
pub use error::{HypeError, HypeResult};
pub use markup::escape_hyper_text;
pub use motion::{beats_of, compute_window, is_displayable_beat, Playhead};
pub use scope::DocumentScopeStore;
pub use types::{Beat, CompileOutput, ContentNode, Direction, EdgeRole, MotionWindow, NodeKind};

/// Compiles `text` and serializes the output as pretty JSON.
pub fn compile_to_json(text: &str, options: &CompileOptions) -> HypeResult<String> {
    let mut store = DocumentScopeStore::new();
    let output = compile(text, &mut store, options);
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Compiles `text`, filters it to stage beats and serializes the window
/// around `active_index` as pretty JSON.
pub fn window_to_json(text: &str, active_index: usize, direction: &str) -> HypeResult<String> {
    let direction: Direction = direction.parse()?;
    let output = compile_text(text);
    let beats = beats_of(&output.nodes, is_displayable_beat);
    let window = compute_window(&beats, active_index, direction);
    Ok(serde_json::to_string_pretty(&window)?)
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pyfunction]
#[pyo3(name = "compile_text")]
fn compile_text_py(text: String) -> PyResult<String> {
    compile_to_json(&text, &CompileOptions::default())
        .map_err(|e| PyErr::new::<pyo3::exceptions::PyRuntimeError, _>(e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compile_text_wasm(text: &str) -> Result<String, JsValue> {
    compile_to_json(text, &CompileOptions::default()).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compile_text_with_options_wasm(text: &str, options_json: &str) -> Result<String, JsValue> {
    let options: CompileOptions =
        serde_json::from_str(options_json).map_err(|e| JsValue::from_str(&e.to_string()))?;
    compile_to_json(text, &options).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn compute_window_wasm(
    text: &str,
    active_index: usize,
    direction: &str,
) -> Result<String, JsValue> {
    window_to_json(text, active_index, direction).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(feature = "python", not(target_arch = "wasm32")))]
#[pymodule]
fn hype_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(compile_text_py, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn run_fixture(input_path: &Path, options: &CompileOptions) {
        let golden_path = format!("{}.golden.json", input_path.display());
        let input = fs::read_to_string(input_path).expect("Failed to read input");
        let golden = fs::read_to_string(&golden_path).expect("Failed to read golden");

        let json_out = compile_to_json(&input, options).unwrap();
        let v_out: serde_json::Value = serde_json::from_str(&json_out).unwrap();
        let v_golden: serde_json::Value = serde_json::from_str(&golden).unwrap();

        if v_out != v_golden {
            let nodes_out = v_out["nodes"].as_array().unwrap();
            let nodes_golden = v_golden["nodes"].as_array().unwrap();

            if nodes_out.len() == nodes_golden.len() {
                for (i, (a, b)) in nodes_out.iter().zip(nodes_golden.iter()).enumerate() {
                    if a != b {
                        println!("Mismatch at node index {}", i);
                        println!("Got: {}", serde_json::to_string_pretty(a).unwrap());
                        println!("Exp: {}", serde_json::to_string_pretty(b).unwrap());
                        break;
                    }
                }
            }

            assert_eq!(v_out, v_golden, "Mismatch in fixture {}", input_path.display());
        }
    }

    #[test]
    fn test_fixtures() {
        let root = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures");
        let fixtures_text =
            fs::read_to_string(root.join("fixtures.json")).expect("Failed to read fixtures.json");
        let fixtures: serde_json::Value =
            serde_json::from_str(&fixtures_text).expect("Invalid fixtures.json");
        let obj = fixtures
            .as_object()
            .expect("fixtures.json must be an object");

        for (name, cfg) in obj {
            let options: CompileOptions =
                serde_json::from_value(cfg.clone()).expect("Invalid fixture options");
            run_fixture(&root.join(name), &options);
        }
    }

    #[test]
    fn window_json_reports_flags() {
        let json = window_to_json("@ Ty\n> Welcome.\n@ Left", 1, "back").unwrap();
        let v: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v["direction"], "backward");
        assert_eq!(v["beats"][0]["edge_role"], "enter");
        assert_eq!(v["beats"][1]["is_active"], true);
        assert_eq!(v["beats"][2]["edge_role"], "leave");
        assert_eq!(v["beats"][2]["reversed"], true);
    }

    #[test]
    fn unknown_direction_is_an_error() {
        let err = window_to_json("@ Ty", 0, "sideways").unwrap_err();
        assert!(matches!(err, HypeError::UnknownDirection(ref d) if d == "sideways"));
    }
}
