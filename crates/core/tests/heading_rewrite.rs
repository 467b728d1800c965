use insta::assert_snapshot;
use notestore_core::heading::{self, RewritePlan, SkipReason};
use notestore_core::metadata;
use rstest::rstest;

fn plan_for(title: &str, content: &str) -> RewritePlan {
    let meta = metadata::extract(content);
    heading::plan(title, &meta.headings, meta.frontmatter_end).unwrap()
}

fn rewrite(title: &str, content: &str) -> String {
    heading::apply(&plan_for(title, content), content).unwrap()
}

fn levels(content: &str) -> Vec<u8> {
    metadata::extract(content).headings.iter().map(|h| h.level).collect()
}

#[rstest]
#[case::no_headings("Body only\n", "insert")]
#[case::only_subheadings("## A\n\n### B\n", "insert")]
#[case::blank_title("# \n\nbody\n", "replace")]
#[case::titled("# Existing\n\n## Sub\n", "skip")]
#[case::two_titles("# A\n\n# B\n", "shift")]
#[case::two_blank_titles("# \n\n# \n", "shift")]
#[case::level_six("# A\n\n###### F\n\n# B\n", "skip")]
#[case::frontmatter_only("---\ntags: [a]\n---\n", "insert")]
fn routes(#[case] content: &str, #[case] route: &str) {
    assert_eq!(plan_for("T", content).route(), route);
}

#[test]
fn insert_then_replan_skips() {
    let once = rewrite("Title", "---\na: 1\n---\nSome text\n");
    assert_eq!(plan_for("Title", &once), RewritePlan::Skip(SkipReason::HasTitle));
    assert_eq!(rewrite("Title", &once), once);
}

#[test]
fn shift_demotes_every_heading_once() {
    let out = rewrite("T", "# A\n\n## B\n\n# C\n");
    assert_eq!(levels(&out), vec![1, 2, 3, 2]);
    assert_eq!(plan_for("T", &out), RewritePlan::Skip(SkipReason::HasTitle));
}

#[test]
fn shift_demotes_indented_subheading() {
    let out = rewrite("T", "# A\n\n  ## B\n\n# C\n");
    assert_eq!(out, "# T\n\n## A\n\n  ### B\n\n## C");
    assert_eq!(levels(&out), vec![1, 2, 3, 2]);
}

#[test]
fn shift_rewrites_setext_title_as_atx() {
    let out = rewrite("T", "A\n===\n\n# B\n");
    assert_eq!(out, "# T\n\n## A\n\n## B");
    assert_eq!(levels(&out), vec![1, 2, 2]);
}

#[test]
fn shift_rewrites_setext_subheading() {
    let out = rewrite("T", "# A\n\nSub\n---\n\n# B\n");
    assert_eq!(levels(&out), vec![1, 2, 3, 2]);
    assert_eq!(plan_for("T", &out), RewritePlan::Skip(SkipReason::HasTitle));
}

#[test]
fn level_six_leaves_text_unchanged() {
    let content = "# A\n\n###### Deep\n\n# B\n";
    assert_eq!(rewrite("T", content), content);
}

#[test]
fn quoted_heading_is_not_demoted() {
    let out = rewrite("T", "# A\n\n> # Quote\n\n# B\n");
    assert_eq!(out, "# T\n\n## A\n\n> # Quote\n\n## B");
}

#[test]
fn replace_keeps_frontmatter() {
    assert_snapshot!(rewrite("Note", "---\nid: 1\n---\n\n#   \n\nBody\n"), @r"
    ---
    id: 1
    ---

    # Note

    Body
    ");
}

#[test]
fn shift_after_frontmatter() {
    let content = "---\ntags: [a]\n---\nIntro\n\n# One\n\ntext\n\n## Sub\n\n# Two\n";
    assert_snapshot!(rewrite("Weekly Review", content), @r"
    ---
    tags: [a]
    ---

    # Weekly Review

    Intro

    ## One

    text

    ### Sub

    ## Two
    ");
}

#[test]
fn insert_into_empty_note() {
    assert_eq!(rewrite("Empty", ""), "# Empty");
}
