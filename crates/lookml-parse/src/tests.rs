use std::fs;
use std::path::{Path, PathBuf};

use expect_test::{expect, expect_file};
use lookml_tree::{
    BlockNode, ContainerNode, DocumentNode, ListNode, PairNode, SyntaxToken, Visitor,
};

use crate::parse_text;

#[derive(PartialEq, Eq, PartialOrd, Ord)]
struct TestCase {
    input: PathBuf,
    expected: PathBuf,
    text: String,
}

impl TestCase {
    fn list() -> Vec<Self> {
        let test_data_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("test_data");

        let mut cases = fs::read_dir(&test_data_dir)
            .unwrap_or_else(|err| {
                panic!("Cannot read directory {}: {err}", test_data_dir.display())
            })
            .filter_map(|entry| {
                let path = entry.ok()?.path();
                if path.extension()? == "lkml" {
                    let expected = path.with_extension("tree");
                    let text = fs::read_to_string(&path).ok()?;
                    Some(Self { input: path, expected, text })
                } else {
                    None
                }
            })
            .collect::<Vec<_>>();

        cases.sort();
        cases
    }
}

/// One line per node, trivia left out.
#[derive(Default)]
struct DebugTree {
    depth: usize,
    out: String,
}

impl DebugTree {
    fn line(&mut self, text: &str) {
        self.out.push_str(&"  ".repeat(self.depth));
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.depth += 1;
        f(self);
        self.depth -= 1;
    }
}

impl Visitor for DebugTree {
    type Output = ();

    fn visit_document(&mut self, document: &DocumentNode) {
        document.container().accept(self);
    }

    fn visit_container(&mut self, container: &ContainerNode) {
        for item in container.items() {
            item.accept(self);
        }
    }

    fn visit_block(&mut self, block: &BlockNode) {
        match block.name() {
            Some(name) => self.line(&format!("BLOCK {} {}", block.key().value(), name.value())),
            None => self.line(&format!("BLOCK {}", block.key().value())),
        }
        self.nested(|this| block.container().accept(this));
    }

    fn visit_list(&mut self, list: &ListNode) {
        self.line(&format!("LIST {}", list.key().value()));
        self.nested(|this| {
            for item in list.items() {
                item.accept(this);
            }
        });
    }

    fn visit_pair(&mut self, pair: &PairNode) {
        self.line(&format!("PAIR {} {}", pair.key().value(), pair.value().format_value()));
    }

    fn visit_token(&mut self, token: &SyntaxToken) {
        self.line(&format!("VALUE {}", token.format_value()));
    }
}

#[test]
fn parse() {
    for case in TestCase::list() {
        let actual = match parse_text(&case.text) {
            Ok(document) => {
                assert_eq!(
                    document.to_string(),
                    case.text,
                    "{} does not render back to its source",
                    case.input.display()
                );
                let mut tree = DebugTree::default();
                document.accept(&mut tree);
                tree.out
            }
            Err(diagnostic) => {
                format!("error: {} @ {:?}\n", diagnostic.message(), diagnostic.range())
            }
        };
        expect_file![&case.expected].assert_eq(&actual);
    }
}

#[test]
fn empty_document() {
    let document = parse_text("  # nothing here\n").unwrap();
    assert!(document.container().is_empty());
    assert_eq!(document.prefix(), "  # nothing here\n");
}

#[test]
fn trivia_placement() {
    let document = parse_text("view: v {\n  label: \"V\" # shown\n}\n").unwrap();
    let [view] = document.container().items() else { panic!("expected one item") };
    let lookml_tree::Node::Block(view) = view else { panic!("expected a block") };
    assert_eq!(view.left_brace().trivia().prefix, " ");
    assert_eq!(view.right_brace().trivia().prefix, "\n");

    let [label] = view.children() else { panic!("expected one child") };
    assert_eq!(label.key().prefix(), "\n  ");
    let lookml_tree::Node::Pair(label) = label else { panic!("expected a pair") };
    assert_eq!(label.value().suffix(), " # shown");
    assert_eq!(document.suffix(), "\n");
}

#[test]
fn expression_whitespace_moves_to_colon() {
    let document = parse_text("sql:   SELECT 1  ;;").unwrap();
    let [lookml_tree::Node::Pair(pair)] = document.container().items() else {
        panic!("expected one pair")
    };
    assert_eq!(pair.colon().trivia().suffix, "   ");
    assert_eq!(pair.value().value(), "SELECT 1");
    expect![[r#"sql:   SELECT 1  ;;"#]].assert_eq(&document.to_string());
}

#[test]
fn key_whitespace_before_colon() {
    let text = "hidden : yes\nfields : [ a , b , ]\n";
    let document = parse_text(text).unwrap();
    assert_eq!(document.to_string(), text);
    assert_eq!(document.container().items()[0].key().suffix(), " ");
}
