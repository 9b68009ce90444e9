use crate::types::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrintMode {
    /// One line, s-expression style.
    Compact,
    /// One node per line, list children indented by depth.
    Tree,
}

impl Default for PrintMode {
    fn default() -> Self {
        PrintMode::Compact
    }
}

pub fn render(cell: &Cell, mode: PrintMode) -> String {
    match mode {
        PrintMode::Compact => pr_str(cell),
        PrintMode::Tree => print(cell),
    }
}

pub fn pr_str(cell: &Cell) -> String {
    cell.to_string()
}

/// Diagnostic rendering. Not meant to be read back in.
pub fn print(cell: &Cell) -> String {
    let mut lines = Vec::new();
    print_into(cell, 0, &mut lines);
    lines.join("\n")
}

fn print_into(cell: &Cell, level: usize, lines: &mut Vec<String>) {
    let indent = "\t".repeat(level);
    let line = match cell {
        Cell::Symbol(name) => format!("Symbol({})", name),
        Cell::Number(x) => format!("Number({})", x),
        Cell::String(s) => format!("String(\"{}\")", s),
        Cell::Proc(b) => format!("Proc({})", b.name),
        Cell::Lambda(_) => "Lambda".to_string(),
        Cell::List(children) => {
            lines.push(format!("{}List", indent));
            for child in children {
                print_into(child, level + 1, lines);
            }
            return;
        }
    };
    lines.push(indent + &line);
}
