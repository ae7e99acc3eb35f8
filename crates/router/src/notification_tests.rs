use super::*;

fn repo() -> RepositoryName {
    RepositoryName::new("org/repo").unwrap()
}

#[test]
fn test_sensitive_change_names_branch_repository_and_pusher() {
    let repository = repo();
    let branch = BranchName::new("main").unwrap();
    let pusher = UserLogin::new("alice").unwrap();

    let n = Notification::SensitiveChange {
        branch: &branch,
        repository: &repository,
        pusher: &pusher,
    };

    assert_eq!(
        n.to_string(),
        "🚨 Sensitive changes detected on branch main in org/repo by alice"
    );
    assert_eq!(n.tag(), "sensitive_change");
}

#[test]
fn test_pull_request_messages() {
    let repository = repo();

    let opened = Notification::PullRequestOpened {
        number: PullRequestNumber::new(42),
        title: "Add login",
        repository: &repository,
    };
    let merged = Notification::PullRequestMerged {
        number: PullRequestNumber::new(42),
        repository: &repository,
    };

    assert_eq!(opened.to_string(), "📝 New PR #42: Add login in org/repo");
    assert_eq!(merged.to_string(), "✅ PR #42 merged in org/repo");
}

#[test]
fn test_issue_comment_quotes_the_body() {
    let repository = repo();
    let author = UserLogin::new("bob").unwrap();

    let n = Notification::IssueComment {
        issue: IssueNumber::new(7),
        repository: &repository,
        body: "looks good",
        author: &author,
    };

    assert_eq!(
        n.to_string(),
        "💬 New comment on issue #7 in org/repo: \"looks good\" by bob"
    );
}

#[test]
fn test_security_messages() {
    let repository = repo();

    let advisory = Notification::AdvisoryPublished {
        repository: &repository,
        summary: "RCE in parser",
    };
    let alert = Notification::VulnerabilityAlert {
        repository: &repository,
        package: "lodash",
    };

    assert_eq!(
        advisory.to_string(),
        "🚨 Security advisory published in org/repo: RCE in parser"
    );
    assert_eq!(
        alert.to_string(),
        "🔒 New vulnerability alert in org/repo for lodash"
    );
}
