//! Host onboarding alert model.

/// Identifying facts about a newly seen machine, as given on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertInput {
    pub computer_name: String,
    pub internal_ip: String,
    pub external_ip: String,
    pub user_name: String,
    pub process: String,
}

/// Human-readable alert text, derived from an [`AlertInput`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage(String);

impl AlertMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AlertMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds the alert text.
///
/// Every field is copied verbatim, one labelled line each, in the order
/// host name, internal IP, external IP, user name, process. The closing
/// `@所有人` is plain text; channel-level mentions are set by the providers.
pub fn compose_alert(input: &AlertInput) -> AlertMessage {
    AlertMessage(format!(
        "新主机上线！\n主机名：{}\n内网 IP：{}\n外网 IP：{}\n用户名：{}\n进程：{}\n请及时处理！@所有人",
        input.computer_name, input.internal_ip, input.external_ip, input.user_name, input.process
    ))
}
