//! Property-based tests for dispatch using proptest.

use gitrack_dispatch::{
    all_command_paths, dispatch, validate_args, validate_flags, ArgSpec, CommandSpec,
    DispatchError, DispatchNode, FlagDescriptor, ParsedFlags, Resolution,
};
use proptest::prelude::*;

// ============================================================================
// Test helpers
// ============================================================================

fn noop(_: &[String], _: &ParsedFlags) -> anyhow::Result<()> {
    Ok(())
}

fn tree() -> DispatchNode {
    let mut root = DispatchNode::root(
        "gitrack",
        "Track git activity",
        "gitrack <command> [<args>]",
        vec![
            FlagDescriptor::global(["--help", "-h"], "Show help"),
            FlagDescriptor::global(["--repo", "-r"], "Repository").value_hint("<path>"),
        ],
    );
    root.add_command(
        CommandSpec::new("track", "Start tracking")
            .arg(ArgSpec::required("path", "Repository"))
            .flag(FlagDescriptor::new(["--name"], "Display name").value_hint("<name>"))
            .action(noop),
    );
    root.add_command(
        CommandSpec::new("logs", "Show commits")
            .arg(ArgSpec::optional("repo", "Repository"))
            .flag(FlagDescriptor::new(["--since"], "Start date").value_hint("<date>"))
            .action(noop),
    );
    root.add_command(CommandSpec::new("status", "Show status").action(noop));
    let config = root.add_group("config", "Settings", "gitrack config <command>");
    config.add_command(
        CommandSpec::new("set", "Set a value")
            .arg(ArgSpec::required("key", "Setting"))
            .arg(ArgSpec::required("value", "Value"))
            .action(noop),
    );
    config.add_command(CommandSpec::new("list", "List settings").action(noop));
    root
}

const WORDS: &[&str] = &[
    "track", "logs", "status", "config", "set", "list", "trak", "/repo", "main", "x",
];

const FLAGS: &[&str] = &[
    "--repo=/src", "-r=/tmp", "--name=app", "--since=2024-01-01", "--bogus", "-v", "--oneline",
];

fn tokens_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(WORDS).prop_map(String::from), 0..6)
}

fn flags_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(prop::sample::select(FLAGS).prop_map(String::from), 0..4)
}

/// Everything observable about a dispatch result, as a comparable string.
fn summarize(result: &Result<Resolution<'_>, DispatchError>) -> String {
    match result {
        Ok(res) => format!(
            "{:?} {:?} {} {:?}",
            res.node.path(),
            res.args,
            res.exit_code,
            res.help().map(|page| (&page.subject, &page.text)),
        ),
        Err(err) => format!("error {:?}: {err}", err.kind()),
    }
}

fn is_usage_error(err: &DispatchError) -> bool {
    matches!(
        err,
        DispatchError::InvalidFlag { .. } | DispatchError::MissingArgument { .. }
    )
}

// ============================================================================
// Property tests
// ============================================================================

proptest! {
    /// Dispatching the same input twice gives the same result.
    #[test]
    fn dispatch_is_deterministic(tokens in tokens_strategy(), flags in flags_strategy()) {
        let root = tree();
        let first = dispatch(&root, tokens.clone(), ParsedFlags::new(flags.clone()));
        let second = dispatch(&root, tokens, ParsedFlags::new(flags));
        prop_assert_eq!(summarize(&first), summarize(&second));
    }

    /// A `help` token anywhere means no usage error, whatever the flags.
    #[test]
    fn help_keyword_never_yields_usage_errors(
        tokens in tokens_strategy(),
        position in any::<prop::sample::Index>(),
        flags in flags_strategy(),
    ) {
        let root = tree();
        let mut tokens = tokens;
        let at = position.index(tokens.len() + 1);
        tokens.insert(at, "help".to_string());

        match dispatch(&root, tokens, ParsedFlags::new(flags)) {
            Ok(res) => prop_assert!(res.is_help()),
            Err(err) => prop_assert!(!is_usage_error(&err), "got {err:?}"),
        }
    }

    /// `--help` or `-h` always yields a help page when no `help` token is present.
    #[test]
    fn help_flag_always_yields_help(
        tokens in tokens_strategy(),
        flags in flags_strategy(),
        short in any::<bool>(),
    ) {
        let root = tree();
        let mut flags = flags;
        flags.push(if short { "-h" } else { "--help" }.to_string());

        let res = dispatch(&root, tokens, ParsedFlags::new(flags));
        prop_assert!(res.is_ok());
        prop_assert!(res.unwrap().is_help());
    }

    /// Resolution stops at the first unmatched token; the rest stay positional.
    #[test]
    fn resolution_is_prefix_monotonic(tokens in tokens_strategy()) {
        let root = tree();
        let res = dispatch(&root, tokens.clone(), ParsedFlags::new(["--help"])).unwrap();

        let consumed = res.node.command_path().len();
        prop_assert_eq!(res.node.command_path(), &tokens[..consumed]);
        prop_assert_eq!(&res.args[..], &tokens[consumed..]);
        if let Some(next) = res.args.first() {
            prop_assert!(res.node.child(next).is_none());
        }
    }

    /// Root flags are valid at every node; a local flag only where declared.
    #[test]
    fn flag_scope_is_root_union_node(index in any::<prop::sample::Index>()) {
        let root = tree();
        let paths = all_command_paths(&root);
        let path = index.get(&paths);
        let segments: Vec<&str> = path.split(' ').collect();
        let node = root.find(segments.as_slice()).unwrap();

        let global = ParsedFlags::new(["--repo=/src", "-h"]);
        prop_assert!(validate_flags(&root, node, &global).is_ok());

        let local = ParsedFlags::new(["--since=2024-01-01"]);
        prop_assert_eq!(validate_flags(&root, node, &local).is_ok(), path == "logs");
        prop_assert!(validate_flags(&root, &root, &local).is_err());
    }

    /// Equals form and space form read back the same value.
    #[test]
    fn string_value_round_trips(
        name in "[a-z][a-z-]{0,8}",
        value in "[a-zA-Z0-9/._][a-zA-Z0-9/._-]{0,12}",
    ) {
        let flag = format!("--{name}");
        let joined = ParsedFlags::new([format!("{flag}={value}")]);
        let spaced = ParsedFlags::new([flag.clone(), value.clone()]);

        prop_assert_eq!(joined.string(&flag, "default"), value.clone());
        prop_assert_eq!(spaced.string(&flag, "default"), value);
    }

    /// Malformed integers fall back to the default.
    #[test]
    fn int_falls_back_on_garbage(garbage in "[a-z]{1,6}", default in any::<i64>()) {
        let flags = ParsedFlags::new([format!("--limit={garbage}")]);
        prop_assert_eq!(flags.int("--limit", default), default);
    }

    /// Well-formed integers parse back exactly.
    #[test]
    fn int_round_trips(n in any::<i64>()) {
        let joined = ParsedFlags::new([format!("--limit={n}")]);
        prop_assert_eq!(joined.int("--limit", 0), n);
    }

    /// Dates that parse always format back to the input.
    #[test]
    fn date_never_panics(y in 0u32..10000, m in 0u32..15, d in 0u32..35) {
        let raw = format!("{y:04}-{m:02}-{d:02}");
        let flags = ParsedFlags::new([format!("--since={raw}")]);
        if let Some(date) = flags.date("--since") {
            prop_assert_eq!(date.format("%Y-%m-%d").to_string(), raw);
        }
    }

    /// Signs, stray spaces and short fields are never read as dates.
    #[test]
    fn date_accepts_only_canonical_form(
        raw in "[+ -]?[0-9]{1,4}-[ ]?[0-9]{1,2}-[ ]?[0-9]{1,2}[ ]?",
    ) {
        let flags = ParsedFlags::new([format!("--since={raw}")]);
        if let Some(date) = flags.date("--since") {
            prop_assert_eq!(date.format("%Y-%m-%d").to_string(), raw);
        }
    }

    /// With N required args, M < N supplied fails naming arg M; M >= N passes.
    #[test]
    fn validator_arity(required in 0usize..5, supplied in 0usize..8) {
        let mut root = DispatchNode::root("gitrack", "", "", vec![]);
        let mut spec = CommandSpec::new("cmd", "").action(noop);
        for i in 0..required {
            spec = spec.arg(ArgSpec::required(format!("arg{i}"), ""));
        }
        let node = root.add_command(spec);
        let args: Vec<String> = (0..supplied).map(|i| format!("v{i}")).collect();

        match validate_args(node, &args) {
            Ok(()) => prop_assert!(supplied >= required),
            Err(DispatchError::MissingArgument { name, .. }) => {
                prop_assert!(supplied < required);
                prop_assert_eq!(name, format!("arg{supplied}"));
            }
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }
}
