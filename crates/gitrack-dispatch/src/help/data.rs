//! Help data extraction from the command tree.

use serde::Serialize;

use crate::node::{Category, DispatchNode};
use crate::topics::TopicRegistry;

use super::config::HelpConfig;

/// Minimum width for the name column in help output (commands, flags, topics).
pub(crate) const NAME_COLUMN_WIDTH: usize = 14;

/// Spaces between the widest name and its summary.
const COLUMN_GAP: usize = 2;

#[derive(Debug, Serialize)]
pub(crate) struct HelpData {
    pub name: String,
    pub summary: String,
    pub usage: String,
    pub description: Vec<String>,
    pub sections: Vec<Section>,
    pub flags: Vec<Row>,
    pub topics: Vec<Row>,
    pub footer: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Serialize)]
pub(crate) struct Row {
    pub name: String,
    pub padding: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct TopicsData {
    pub name: String,
    pub topics: Vec<Row>,
    pub footer: Option<String>,
}

/// Builds the root page: commands grouped by category, then topics.
pub(crate) fn extract_root_data(
    root: &DispatchNode,
    config: &HelpConfig,
    topics: &TopicRegistry,
) -> HelpData {
    let leaves = root.leaf_commands();

    let mut sections = Vec::new();
    for category in Category::ALL {
        let mut members: Vec<&DispatchNode> = leaves
            .iter()
            .copied()
            .filter(|node| node.category() == category)
            .collect();
        if members.is_empty() {
            continue;
        }
        sort_commands(&mut members, config);
        sections.push(Section {
            title: category.title().to_string(),
            rows: command_rows(&members),
        });
    }

    HelpData {
        name: identity(root),
        summary: root.summary().to_string(),
        usage: usage_line(root),
        description: description_lines(root),
        sections,
        flags: Vec::new(),
        topics: topic_rows(topics),
        footer: footer(root, config),
    }
}

/// Builds the page for a group or command: its children and its own flags.
pub(crate) fn extract_node_data(node: &DispatchNode, config: &HelpConfig) -> HelpData {
    let mut children = node.children();
    sort_commands(&mut children, config);

    let sections = if children.is_empty() {
        Vec::new()
    } else {
        vec![Section {
            title: "COMMANDS".to_string(),
            rows: into_rows(
                children
                    .iter()
                    .map(|child| (child.name().to_string(), child.summary().to_string()))
                    .collect(),
            ),
        }]
    };

    let flags = into_rows(
        node.flags()
            .iter()
            .map(|flag| {
                let mut name = flag.names.join(", ");
                if let Some(hint) = &flag.value_hint {
                    name.push(' ');
                    name.push_str(hint);
                }
                (name, flag.description.clone())
            })
            .collect(),
    );

    HelpData {
        name: identity(node),
        summary: node.summary().to_string(),
        usage: usage_line(node),
        description: description_lines(node),
        sections,
        flags,
        topics: Vec::new(),
        footer: footer(node, config),
    }
}

/// Builds the `help topics` listing.
pub(crate) fn extract_topics_data(
    root: &DispatchNode,
    config: &HelpConfig,
    topics: &TopicRegistry,
) -> TopicsData {
    TopicsData {
        name: root.name().to_string(),
        topics: topic_rows(topics),
        footer: config
            .show_footer
            .then(|| format!("Run '{} help <topic>' to read about a topic.", root.name())),
    }
}

fn identity(node: &DispatchNode) -> String {
    node.path().join(" ")
}

/// The declared usage, or one derived from the path and argument specs.
pub(crate) fn usage_line(node: &DispatchNode) -> String {
    if !node.usage().is_empty() {
        return node.usage().to_string();
    }

    let mut usage = node.path().join(" ");
    if node.has_children() {
        usage.push_str(" <command>");
    }
    for arg in node.args() {
        if arg.required {
            usage.push_str(&format!(" <{}>", arg.name));
        } else {
            usage.push_str(&format!(" [<{}>]", arg.name));
        }
    }
    if !node.flags().is_empty() {
        usage.push_str(" [<flags>]");
    }
    usage
}

fn description_lines(node: &DispatchNode) -> Vec<String> {
    node.description()
        .map(|text| {
            text.trim_end()
                .lines()
                .map(|line| {
                    if line.trim().is_empty() {
                        String::new()
                    } else {
                        format!("    {}", line)
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

fn footer(node: &DispatchNode, config: &HelpConfig) -> Option<String> {
    let program = node.path().first()?;
    config.show_footer.then(|| {
        format!(
            "Run '{} help <command>' for more information on a specific command.",
            program
        )
    })
}

/// Orders commands by explicit rank, then alphabetically by command path.
fn sort_commands(nodes: &mut [&DispatchNode], config: &HelpConfig) {
    nodes.sort_by_cached_key(|node| {
        let path = node.command_path().join(" ");
        (config.rank(&path), path)
    });
}

fn command_rows(nodes: &[&DispatchNode]) -> Vec<Row> {
    into_rows(
        nodes
            .iter()
            .map(|node| (node.command_path().join(" "), node.summary().to_string()))
            .collect(),
    )
}

fn topic_rows(topics: &TopicRegistry) -> Vec<Row> {
    into_rows(
        topics
            .list_topics()
            .iter()
            .map(|topic| (topic.name.clone(), topic.title.clone()))
            .collect(),
    )
}

/// Pads names so every summary in a block starts in the same column.
fn into_rows(entries: Vec<(String, String)>) -> Vec<Row> {
    let width = entries
        .iter()
        .map(|(name, _)| name.chars().count() + COLUMN_GAP)
        .max()
        .unwrap_or(0)
        .max(NAME_COLUMN_WIDTH);

    entries
        .into_iter()
        .map(|(name, summary)| Row {
            padding: " ".repeat(width - name.chars().count()),
            name,
            summary,
        })
        .collect()
}
