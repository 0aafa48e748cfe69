use graft_nodes::{GraftConfig, Host, Node};
use graft_reconciler::{ReconcilerAdapter, ReconcilerTarget};
use graft_scene::World;
use graft_variant::{WireMap, WireValue};
use serde::Deserialize;
use serde_json::json;
use std::env;
use std::fs;
use std::path::Path;

const DEFAULT_LOG_FILTER: &str = "error";

/// One element of a tree file: `{ "type": ..., "props": {...}, "children": [...] }`.
#[derive(Debug, Deserialize)]
struct TreeNode {
    #[serde(rename = "type")]
    ty: String,
    #[serde(default)]
    props: serde_json::Map<String, serde_json::Value>,
    #[serde(default)]
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn wire_props(&self) -> WireMap {
        let value = WireValue::from_json_value(serde_json::Value::Object(self.props.clone()));
        value.as_object().cloned().unwrap_or_default()
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let filter = parse_flag_value(&args, "--log").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    let Some(command) = args.get(1).map(String::as_str) else {
        print_usage();
        std::process::exit(2);
    };

    let result = match command {
        "render" => render_command(&args),
        "types" => types_command(),
        _ => {
            print_usage();
            Err(format!("unknown command `{command}`"))
        }
    };

    if let Err(err) = result {
        log::error!("{err}");
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  graft_cli render [--tree <tree.json>] [--config <graft.toml>] [--log <filter>]");
    eprintln!("  graft_cli types  [--log <filter>]   # catalogued types and their properties");
}

fn parse_flag_value(args: &[String], flag: &str) -> Option<String> {
    let idx = args.iter().position(|a| a == flag)?;
    args.get(idx + 1).cloned()
}

fn render_command(args: &[String]) -> Result<(), String> {
    let config = match parse_flag_value(args, "--config") {
        Some(path) => GraftConfig::load(Path::new(&path))
            .map_err(|err| format!("failed to load config {path}: {err}"))?,
        None => GraftConfig::default(),
    };
    let roots = match parse_flag_value(args, "--tree") {
        Some(path) => {
            let text = fs::read_to_string(&path).map_err(|err| format!("failed to read {path}: {err}"))?;
            serde_json::from_str::<Vec<TreeNode>>(&text)
                .map_err(|err| format!("invalid tree file {path}: {err}"))?
        }
        None => sample_tree()?,
    };

    let (adapter, container) = stage(config)?;
    for (depth, node) in render(&adapter, &container, &roots)? {
        let indent = "  ".repeat(depth);
        println!("{indent}{}", node.describe());
        if let Some(rect) = node.bounding_rect() {
            let rect = serde_json::to_string(&rect).map_err(|err| err.to_string())?;
            println!("{indent}  rect {rect}");
        }
        for line in node.dump() {
            println!("{indent}  {line}");
        }
    }
    Ok(())
}

fn types_command() -> Result<(), String> {
    let catalog = graft_scene::catalog();
    let mut types: Vec<_> = catalog.types().collect();
    types.sort_by_key(|ty| ty.name);
    for ty in types {
        let Some(bag) = catalog.exact(ty) else {
            continue;
        };
        match ty.base {
            Some(base) => println!("{ty} : {base}"),
            None => println!("{ty}"),
        }
        for descriptor in bag.iter() {
            let access = if descriptor.is_read_only() { " (read-only)" } else { "" };
            println!("  {}: {}{access}", descriptor.name(), descriptor.value_type());
        }
    }
    Ok(())
}

/// A world with a main camera and a `Stage` object carrying a UI document,
/// plus the adapter rendering into it.
fn stage(config: GraftConfig) -> Result<(ReconcilerAdapter, Node), String> {
    let mut world = World::new();
    let camera = world.create_object("Main Camera");
    world.add_component(camera, "Camera").map_err(|err| err.to_string())?;
    let stage = world.create_object("Stage");
    world.add_component(stage, "UIDocument").map_err(|err| err.to_string())?;

    let adapter = ReconcilerAdapter::new(Host::with_config(world, config));
    let root = adapter
        .container(stage.into())
        .ok_or_else(|| "stage object has no wrapper".to_string())?;
    Ok((adapter, root))
}

/// Mounts `roots` under `container` and returns every created node in
/// pre-order with its depth.
fn render(
    adapter: &ReconcilerAdapter,
    container: &Node,
    roots: &[TreeNode],
) -> Result<Vec<(usize, Node)>, String> {
    let mut mounted = Vec::new();
    for tree in roots {
        let node = mount(adapter, tree, 0, &mut mounted)?;
        adapter
            .append_child_to_container(container, &node)
            .map_err(|err| format!("cannot mount <{}>: {err}", tree.ty))?;
    }
    Ok(mounted)
}

fn mount(
    adapter: &ReconcilerAdapter,
    tree: &TreeNode,
    depth: usize,
    mounted: &mut Vec<(usize, Node)>,
) -> Result<Node, String> {
    let node = adapter
        .create_instance(&tree.ty, &tree.wire_props())
        .map_err(|err| format!("cannot create <{}>: {err}", tree.ty))?;
    mounted.push((depth, node.clone()));
    for child in &tree.children {
        let child_node = mount(adapter, child, depth + 1, mounted)?;
        adapter
            .append_initial_child(&node, &child_node)
            .map_err(|err| format!("cannot append <{}> to <{}>: {err}", child.ty, tree.ty))?;
    }
    Ok(node)
}

fn sample_tree() -> Result<Vec<TreeNode>, String> {
    let value = json!([
        {
            "type": "GameObject",
            "props": { "name": "Player", "tag": "Player" },
            "children": [
                { "type": "#Transform", "props": { "localPosition": [0, 0, 10] } },
                { "type": "MeshRenderer" },
                { "type": "Light", "props": { "intensity": 1.5, "range": 20 } }
            ]
        },
        {
            "type": "VisualElement",
            "props": { "name": "hud" },
            "children": [
                { "type": "Label", "props": { "name": "score", "text": "Score: 0" } },
                { "type": "Button", "props": { "name": "pause", "text": "Pause", "tooltip": "Pause the game" } }
            ]
        }
    ]);
    serde_json::from_value(value).map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_tree_renders() {
        let (adapter, container) = stage(GraftConfig::default()).unwrap();
        let mounted = render(&adapter, &container, &sample_tree().unwrap()).unwrap();
        let depths: Vec<usize> = mounted.iter().map(|(depth, _)| *depth).collect();
        assert_eq!(depths, [0, 1, 1, 1, 0, 1, 1]);

        let player = &mounted[0].1;
        assert_eq!(player.get_prop("tag").unwrap(), WireValue::string("Player"));
        assert!(player.bounding_rect().is_some());
        assert!(!player.dump().is_empty());
    }

    #[test]
    fn tree_files_default_missing_fields() {
        let roots: Vec<TreeNode> = serde_json::from_str(r#"[{ "type": "GameObject" }]"#).unwrap();
        assert!(roots[0].wire_props().is_empty());
        assert!(roots[0].children.is_empty());
    }

    #[test]
    fn unknown_types_fail_the_render() {
        let (adapter, container) = stage(GraftConfig::default()).unwrap();
        let roots: Vec<TreeNode> = serde_json::from_str(r#"[{ "type": "Spaceship" }]"#).unwrap();
        let err = render(&adapter, &container, &roots).unwrap_err();
        assert!(err.starts_with("cannot create <Spaceship>"));
    }

    #[test]
    fn flag_values() {
        let args: Vec<String> = ["graft_cli", "render", "--log", "debug"].map(String::from).to_vec();
        assert_eq!(parse_flag_value(&args, "--log").as_deref(), Some("debug"));
        assert_eq!(parse_flag_value(&args, "--tree"), None);
    }
}
