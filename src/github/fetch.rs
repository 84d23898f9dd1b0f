use octocrab::params::State;
use octocrab::Octocrab;

use crate::github::types::PullRequest;

const PAGE_SIZE: u8 = 100;

/// Page through a repository's closed pull requests.
///
/// Stops when the accumulated count reaches `max_prs`, a page comes back
/// empty, or a request fails. The page that crosses the cap is kept whole,
/// so the result can exceed `max_prs`. A failed request ends pagination and
/// whatever was collected so far is returned; it is a stopping condition,
/// not an error.
pub async fn fetch_closed_prs(
    client: &Octocrab,
    owner: &str,
    repo: &str,
    max_prs: usize,
    verbose: bool,
) -> Vec<PullRequest> {
    if verbose {
        eprintln!("Max PRs: {}", max_prs);
    }

    let mut prs = Vec::new();
    let mut page: u32 = 1;

    loop {
        println!("Requesting page {} of PRs from Github ({}/{})", page, owner, repo);

        let response = client
            .pulls(owner, repo)
            .list()
            .state(State::Closed)
            .per_page(PAGE_SIZE)
            .page(page)
            .send()
            .await;

        let items = match response {
            Ok(current_page) => current_page.items,
            Err(e) => {
                if verbose {
                    eprintln!("Request for page {} failed: {}", page, e);
                }
                break;
            }
        };

        if items.is_empty() {
            break;
        }

        prs.extend(items.into_iter().filter_map(from_api));

        if prs.len() >= max_prs {
            break;
        }

        page += 1;
    }

    prs
}

/// Convert an API pull request into our internal shape.
/// PRs without a creation time cannot contribute a duration and are skipped.
fn from_api(pr: octocrab::models::pulls::PullRequest) -> Option<PullRequest> {
    let created_at = pr.created_at?;

    Some(PullRequest {
        author: pr.user.map(|user| user.login).unwrap_or_default(),
        created_at,
        merged_at: pr.merged_at,
    })
}
