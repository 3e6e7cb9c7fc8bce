use std::env;
use std::io::{self, Write};
use std::process;

use domain::adapters::memory_repo::InMemoryJobRepo;
use domain::service::JobService;
use domain::JobPost;

fn print_usage() {
    eprintln!(
        "{}\n\nUsage:\n  domain list\n  domain get <postId>\n  domain search <keyword>\n\nNotes:\n  - This demo CLI uses a seeded in-memory store; changes are not persisted.",
        domain::about()
    );
}

fn print_post<W: Write>(out: &mut W, post: &JobPost) -> Result<(), String> {
    writeln!(
        out,
        "{:>4}  {} ({}y) [{}]",
        post.post_id,
        post.post_profile,
        post.req_experience,
        post.post_tech_stack.join(", ")
    )
    .map_err(|e| format!("write failed: {}", e))
}

fn print_all<W: Write>(out: &mut W, posts: &[JobPost]) -> Result<(), String> {
    posts.iter().try_for_each(|p| print_post(out, p))
}

fn run<I, W>(args: I, out: &mut W) -> Result<(), String>
where
    I: IntoIterator<Item = String>,
    W: Write,
{
    let mut args = args.into_iter();

    let Some(cmd) = args.next() else {
        print_usage();
        return Ok(());
    };

    let svc = JobService::new(InMemoryJobRepo::seeded());

    match cmd.as_str() {
        "list" => {
            let posts = svc.list().map_err(|e| format!("list failed: {}", e))?;
            print_all(out, &posts)
        }
        "get" => {
            let Some(raw) = args.next() else {
                return Err("missing <postId> for get".into());
            };
            let id = raw
                .parse()
                .map_err(|_| format!("invalid postId: {}", raw))?;
            match svc.get(id) {
                Ok(Some(post)) => {
                    print_post(out, &post)?;
                    writeln!(out, "      {}", post.post_desc)
                        .map_err(|e| format!("write failed: {}", e))
                }
                Ok(None) => Err("not found".into()),
                Err(e) => Err(format!("get failed: {}", e)),
            }
        }
        "search" => {
            // Missing keyword searches with "", which matches everything
            let keyword = args.next().unwrap_or_default();
            let posts = svc
                .search(&keyword)
                .map_err(|e| format!("search failed: {}", e))?;
            print_all(out, &posts)
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn main() {
    let stdout = io::stdout();
    if let Err(msg) = run(env::args().skip(1), &mut stdout.lock()) {
        eprintln!("error: {}", msg);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with(args: &[&str]) -> Result<String, String> {
        let mut out = Vec::new();
        run(args.iter().map(|s| s.to_string()), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn list_prints_every_seed_post() {
        let out = run_with(&["list"]).unwrap();
        assert_eq!(out.lines().count(), 5);
        assert!(out.lines().next().unwrap().contains("Java Developer"));
    }

    #[test]
    fn get_prints_post_and_description() {
        let out = run_with(&["get", "3"]).unwrap();
        let mut lines = out.lines();
        assert!(lines.next().unwrap().contains("Data Scientist"));
        assert!(lines.next().is_some());
    }

    #[test]
    fn get_unknown_id_is_not_found() {
        assert_eq!(run_with(&["get", "99"]).unwrap_err(), "not found");
    }

    #[test]
    fn get_rejects_bad_or_missing_id() {
        assert_eq!(run_with(&["get", "abc"]).unwrap_err(), "invalid postId: abc");
        assert!(run_with(&["get"]).unwrap_err().contains("missing <postId>"));
    }

    #[test]
    fn search_filters_by_keyword() {
        let out = run_with(&["search", "Java"]).unwrap();
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("Java Developer"));
        assert_eq!(run_with(&["search"]).unwrap().lines().count(), 5);
    }

    #[test]
    fn no_args_or_unknown_command_prints_usage_only() {
        assert_eq!(run_with(&[]).unwrap(), "");
        assert_eq!(run_with(&["frobnicate"]).unwrap(), "");
    }
}
