//! Draws a red-black tree as text.
//!
//! Each argument is a command: `+N` inserts N, `-N` deletes N.
//!
//! ```text
//! cargo run --example render -- +10 +5 +15 +12 -10
//! ```

use log::{error, info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use rbtree::{NodeId, RedBlackTree};

const CELL_WIDTH: usize = 6;

struct Placed {
    key: i32,
    red: bool,
    column: usize,
    depth: usize,
}

// Columns follow in-order position, rows follow depth.
fn place(
    tree: &RedBlackTree,
    node: NodeId,
    depth: usize,
    next_column: &mut usize,
    out: &mut Vec<Placed>,
) {
    if node == tree.nil() {
        return;
    }
    place(tree, tree.left(node), depth + 1, next_column, out);
    out.push(Placed {
        key: tree.key(node),
        red: tree.is_red(node),
        column: *next_column,
        depth,
    });
    *next_column += 1;
    place(tree, tree.right(node), depth + 1, next_column, out);
}

fn render(tree: &RedBlackTree) -> String {
    let mut placed = Vec::with_capacity(tree.len());
    place(tree, tree.root(), 0, &mut 0, &mut placed);

    let rows = placed.iter().map(|p| p.depth + 1).max().unwrap_or(0);
    let mut lines = vec![String::new(); rows];
    placed.sort_by_key(|p| (p.depth, p.column));
    for p in &placed {
        let line = &mut lines[p.depth];
        let start = p.column * CELL_WIDTH;
        if line.len() < start {
            line.push_str(&" ".repeat(start - line.len()));
        }
        let marker = if p.red { 'R' } else { 'B' };
        line.push_str(&format!("{}{:<width$}", marker, p.key, width = CELL_WIDTH - 1));
    }
    lines.join("\n")
}

fn main() {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .ok();

    let mut tree = RedBlackTree::new();
    for arg in std::env::args().skip(1) {
        let (insert, digits) = match arg.strip_prefix('-') {
            Some(rest) => (false, rest),
            None => (true, arg.strip_prefix('+').unwrap_or(&arg)),
        };
        let key: i32 = match digits.parse() {
            Ok(key) => key,
            Err(err) => {
                error!("{:?} is not a valid integer: {}", arg, err);
                continue;
            }
        };
        if insert {
            tree.insert(key);
            info!("inserted {}", key);
        } else if let Err(err) = tree.delete(key) {
            error!("{}", err);
        } else {
            info!("deleted {}", key);
        }
    }

    println!("{}", render(&tree));
    match tree.root_key() {
        Ok(key) => println!("root: {} keys: {} valid: {}", key, tree.len(), tree.is_valid()),
        Err(err) => println!("{}", err),
    }
}
