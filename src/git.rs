//! Git integration: cloning templates from remotes, initialising new
//! projects and fetching `.gitignore` files.
use crate::error::Result;
use git2::{IndexAddOption, Repository, Signature};
use log::debug;
use std::path::{Path, PathBuf};
use url::Url;

const GITIGNORE_BASE_URL: &str = "https://raw.githubusercontent.com/github/gitignore/main";

/// Returns true for HTTPS, git:// and ssh:// URLs and for scp-like `git@host:repo` specs.
pub fn is_git_url(s: &str) -> bool {
    if let Ok(url) = Url::parse(s) {
        return matches!(url.scheme(), "https" | "http" | "git" | "ssh");
    }
    s.starts_with("git@")
}

/// Repository name derived from a URL, without a trailing `.git`.
pub fn repo_name(repo_url: &str) -> &str {
    repo_url
        .trim_end_matches('/')
        .rsplit(['/', ':'])
        .next()
        .unwrap_or("template")
        .trim_end_matches(".git")
}

/// Clones a repository into `dest`.
///
/// SSH remotes authenticate with `~/.ssh/id_rsa`.
pub fn clone_repository<P: AsRef<Path>>(repo_url: &str, dest: P) -> Result<PathBuf> {
    let dest = dest.as_ref();
    debug!("Cloning repository '{}' to '{}'.", repo_url, dest.display());

    let mut callbacks = git2::RemoteCallbacks::new();
    callbacks.credentials(|_url, username_from_url, _allowed_types| {
        let key = dirs::home_dir().unwrap_or_default().join(".ssh").join("id_rsa");
        git2::Cred::ssh_key(username_from_url.unwrap_or("git"), None, &key, None)
    });

    let mut fetch_opts = git2::FetchOptions::new();
    fetch_opts.remote_callbacks(callbacks);

    let mut builder = git2::build::RepoBuilder::new();
    builder.fetch_options(fetch_opts);
    builder.clone(repo_url, dest)?;
    Ok(dest.to_path_buf())
}

/// Initialises a repository in `dir` and commits everything in it.
///
/// The commit uses the git configured identity, or `author` when none is set.
pub fn init_repository<P: AsRef<Path>>(dir: P, author: &str) -> Result<()> {
    let dir = dir.as_ref();
    debug!("Initializing git repository in '{}'.", dir.display());
    let repo = Repository::init(dir)?;

    let mut index = repo.index()?;
    index.add_all(["*"], IndexAddOption::DEFAULT, None)?;
    index.write()?;
    let tree = repo.find_tree(index.write_tree()?)?;

    let signature = match repo.signature() {
        Ok(signature) => signature,
        Err(_) => {
            let name = if author.trim().is_empty() { "foundry" } else { author };
            Signature::now(name, "foundry@localhost")?
        }
    };
    repo.commit(Some("HEAD"), &signature, &signature, "Initial commit", &tree, &[])?;
    Ok(())
}

/// Name of the github/gitignore template for a language tag, if there is one.
pub fn gitignore_template_for(language: &str) -> Option<&'static str> {
    let name = match language {
        "Go" => "Go",
        "Python" => "Python",
        "JavaScript" | "TypeScript" | "React" | "Vue" | "Node.js" => "Node",
        "Rust" => "Rust",
        "Java" => "Java",
        "Kotlin" => "Kotlin",
        "C++" | "C/C++" => "C++",
        "C" => "C",
        "C#" => "VisualStudio",
        "PHP" => "Composer",
        "Ruby" => "Ruby",
        "Swift" => "Swift",
        _ => return None,
    };
    Some(name)
}

/// Downloads the `.gitignore` template for a language.
pub fn fetch_gitignore(template_name: &str) -> Result<String> {
    let url = format!("{}/{}.gitignore", GITIGNORE_BASE_URL, template_name);
    debug!("Fetching {}", url);
    let body = reqwest::blocking::get(&url)?.error_for_status()?.text()?;
    Ok(body)
}
