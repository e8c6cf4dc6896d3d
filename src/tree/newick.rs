//! Newick serialization of clustering trees

use super::{NodeKind, TreeNode};
use std::fmt::Write;

/// Significant digits used for branch lengths
const SIGNIFICANT_DIGITS: usize = 6;

impl TreeNode {
    /// Render this tree as a Newick string terminated by `;`.
    ///
    /// Leaves are written as `name:length`, merges as `(left,right):length`.
    /// The root's own branch length is omitted.
    pub fn to_newick(&self) -> String {
        let mut out = String::new();
        write_node(self, &mut out, true);
        out.push(';');
        out
    }
}

fn write_node(node: &TreeNode, out: &mut String, is_root: bool) {
    match &node.kind {
        NodeKind::Leaf { name } => out.push_str(name),
        NodeKind::Merge { children, .. } => {
            out.push('(');
            write_node(&children[0], out, false);
            out.push(',');
            write_node(&children[1], out, false);
            out.push(')');
        }
    }

    if !is_root {
        out.push(':');
        out.push_str(&format_length(node.branch_length));
    }
}

/// Format a value like C's `%g` with six significant digits.
///
/// Trailing zeros are dropped, so `5.0` becomes `5` and `0.5` stays `0.5`.
/// Very small or very large magnitudes switch to exponent form (`1e-05`).
pub fn format_length(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // Round to the target precision first; the exponent of the rounded
    // value decides between fixed and exponent notation.
    let sci = format!("{:.*e}", SIGNIFICANT_DIGITS - 1, value);
    let (mantissa, exponent) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if exponent < -4 || exponent >= SIGNIFICANT_DIGITS as i32 {
        let mut text = String::with_capacity(12);
        text.push_str(trim_fraction(mantissa));
        let sign = if exponent < 0 { '-' } else { '+' };
        let _ = write!(text, "e{}{:02}", sign, exponent.abs());
        text
    } else {
        let decimals = (SIGNIFICANT_DIGITS as i32 - 1 - exponent) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_length() {
        assert_eq!(format_length(5.0), "5");
        assert_eq!(format_length(0.5), "0.5");
        assert_eq!(format_length(7.25), "7.25");
        assert_eq!(format_length(0.0), "0");
        assert_eq!(format_length(-0.0), "0");
        assert_eq!(format_length(0.9366234), "0.936623");
        assert_eq!(format_length(1.0313349), "1.03133");
        assert_eq!(format_length(0.07758614), "0.0775861");
        assert_eq!(format_length(0.39670000001), "0.3967");
        assert_eq!(format_length(0.10000000000000003), "0.1");
        assert_eq!(format_length(0.00001), "1e-05");
        assert_eq!(format_length(1234567.0), "1.23457e+06");
        assert_eq!(format_length(999999.7), "1e+06");
        assert_eq!(format_length(123456.0), "123456");
    }

    #[test]
    fn test_pair_newick() {
        let mut a = TreeNode::leaf("A");
        let mut b = TreeNode::leaf("B");
        a.branch_length = 5.0;
        b.branch_length = 5.0;
        assert_eq!(TreeNode::merge(a, b, 5.0).to_newick(), "(A:5,B:5);");
    }

    #[test]
    fn test_lone_leaf_newick() {
        assert_eq!(TreeNode::leaf("only").to_newick(), "only;");
    }

    #[test]
    fn test_nested_newick_keeps_names_verbatim() {
        let mut left = TreeNode::leaf("pericyte cell");
        let mut right = TreeNode::leaf("skin fibroblast");
        left.branch_length = 0.25;
        right.branch_length = 0.25;
        let mut inner = TreeNode::merge(left, right, 0.25);
        inner.branch_length = 0.5;
        let mut outer = TreeNode::leaf("astrocyte");
        outer.branch_length = 0.75;
        let root = TreeNode::merge(inner, outer, 0.75);
        assert_eq!(
            root.to_newick(),
            "((pericyte cell:0.25,skin fibroblast:0.25):0.5,astrocyte:0.75);"
        );
    }
}
