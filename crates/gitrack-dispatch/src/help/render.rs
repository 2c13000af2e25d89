//! Help rendering functions.

use minijinja::Environment;
use serde::Serialize;

use crate::node::DispatchNode;
use crate::topics::{Topic, TopicRegistry};

use super::config::HelpConfig;
use super::data::{extract_node_data, extract_root_data, extract_topics_data};

const PAGE_TEMPLATE: &str = include_str!("page.txt");
const TOPICS_TEMPLATE: &str = include_str!("topics.txt");
const TOPIC_TEMPLATE: &str = include_str!("topic.txt");

/// Renders the help page for `node`.
///
/// The root gets the overview page with commands grouped by category and the
/// topic list; any other node gets its own page with children and flags.
pub(crate) fn render_help(
    node: &DispatchNode,
    config: &HelpConfig,
    topics: &TopicRegistry,
) -> Result<String, minijinja::Error> {
    let data = if node.is_root() {
        extract_root_data(node, config, topics)
    } else {
        extract_node_data(node, config)
    };
    render("page.txt", PAGE_TEMPLATE, &data)
}

/// Renders the `help topics` listing.
pub(crate) fn render_topic_list(
    root: &DispatchNode,
    config: &HelpConfig,
    topics: &TopicRegistry,
) -> Result<String, minijinja::Error> {
    let data = extract_topics_data(root, config, topics);
    render("topics.txt", TOPICS_TEMPLATE, &data)
}

/// Renders a single topic page.
pub(crate) fn render_topic(topic: &Topic) -> Result<String, minijinja::Error> {
    render(
        "topic.txt",
        TOPIC_TEMPLATE,
        &minijinja::context! {
            title => topic.title,
            content => topic.content.trim_end(),
        },
    )
}

fn render<S: Serialize>(name: &str, source: &str, data: &S) -> Result<String, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.render_named_str(name, source, data)
}
