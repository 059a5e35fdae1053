//! Cloud environment lookup by location.

/// Sovereign cloud a location belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloudEnvironment {
    AzurePublicCloud,
    AzureChinaCloud,
    AzureGermanCloud,
    AzureUSGovernmentCloud,
}

impl CloudEnvironment {
    pub fn from_location(location: &str) -> Self {
        let location = location.to_ascii_lowercase();
        match location.as_str() {
            "chinaeast" | "chinanorth" | "chinaeast2" | "chinanorth2" => Self::AzureChinaCloud,
            "germanynortheast" | "germanycentral" => Self::AzureGermanCloud,
            l if l.starts_with("usgov") || l.starts_with("usdod") => Self::AzureUSGovernmentCloud,
            _ => Self::AzurePublicCloud,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AzurePublicCloud => "AzurePublicCloud",
            Self::AzureChinaCloud => "AzureChinaCloud",
            Self::AzureGermanCloud => "AzureGermanCloud",
            Self::AzureUSGovernmentCloud => "AzureUSGovernmentCloud",
        }
    }

    fn fqdn_suffix(&self) -> &'static str {
        match self {
            Self::AzurePublicCloud => "cloudapp.azure.com",
            Self::AzureChinaCloud => "cloudapp.chinacloudapi.cn",
            Self::AzureGermanCloud => "cloudapp.microsoftazure.de",
            Self::AzureUSGovernmentCloud => "cloudapp.usgovcloudapi.net",
        }
    }
}

/// Public DNS name of the master endpoint for a DNS prefix in a location.
pub fn master_fqdn(dns_prefix: &str, location: &str) -> String {
    let cloud = CloudEnvironment::from_location(location);
    format!("{}.{}.{}", dns_prefix, location, cloud.fqdn_suffix())
}
