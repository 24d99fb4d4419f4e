//! Fixed content pools the generator draws from.

pub const FIRST_NAMES: &[&str] = &[
  "Ada", "Alan", "Amara", "Beatrice", "Bob", "Carlos", "Chen", "Dana", "Diego",
  "Elena", "Emeka", "Farah", "Grace", "Hannah", "Hiro", "Ines", "Ivan", "Jamal",
  "Jane", "Kofi", "Laura", "Liam", "Maya", "Mohammed", "Nadia", "Noah", "Olga",
  "Omar", "Priya", "Quinn", "Rosa", "Sam", "Sofia", "Tariq", "Uma", "Victor",
  "Wen", "Ximena", "Yusuf", "Zoe",
];

pub const LAST_NAMES: &[&str] = &[
  "Abbott", "Alvarez", "Bauer", "Becker", "Brooks", "Castillo", "Chen", "Dubois",
  "Edwards", "Fischer", "Garcia", "Gupta", "Hansen", "Hughes", "Ito", "Jensen",
  "Kowalski", "Kuhlman", "Larsen", "Lopez", "Mensah", "Moreau", "Nakamura",
  "Novak", "Okafor", "Olsen", "Patel", "Quintero", "Reyes", "Rossi", "Schmidt",
  "Silva", "Tanaka", "Turner", "Ueda", "Vargas", "Weber", "Xu", "Yamamoto",
  "Zimmerman",
];

/// Employers assigned to generated contacts.
pub const COMPANY_NAMES: &[&str] = &[
  "Acme Corporation",
  "Globex Inc",
  "Initech LLC",
  "Umbrella Group",
  "Stark Industries",
  "Wayne Enterprises",
  "Hooli",
  "Pied Piper",
  "Vandelay Industries",
  "Soylent Corp",
  "Cyberdyne Systems",
  "Tyrell Corporation",
  "Wonka Holdings",
  "Aperture Science",
  "Black Mesa",
  "Massive Dynamic",
  "Oscorp",
  "Gringotts Ltd",
  "Dunder Mifflin",
  "Prestige Worldwide",
  "Blue Sun Company",
  "Nakatomi Trading",
  "Bluth Company",
  "Monarch Solutions",
  "Kraneland LLC",
  "Northwind Traders",
  "Contoso Ltd",
  "Fabrikam Inc",
  "Tailspin Toys",
  "Wingtip Holdings",
  "IO",
];

/// Trailing words for generated company names.
pub const COMPANY_SUFFIXES: &[&str] = &[
  "Inc", "LLC", "Group", "Ltd", "Corp", "Partners", "Labs", "Systems",
  "Solutions", "and Sons",
];

pub const TLDS: &[&str] = &["com", "io", "net", "org", "co", "biz", "tech"];

pub const JOB_LEVELS: &[&str] = &[
  "Senior", "Junior", "Lead", "Principal", "Chief", "Associate", "Global",
  "Regional",
];

pub const JOB_AREAS: &[&str] = &[
  "Marketing", "Sales", "Engineering", "Product", "Operations", "Finance",
  "Support", "Data", "Security", "Brand",
];

pub const JOB_ROLES: &[&str] = &[
  "Manager", "Director", "Engineer", "Analyst", "Consultant", "Specialist",
  "Officer", "Designer", "Coordinator", "Architect",
];

pub const STREET_NAMES: &[&str] = &[
  "Maple", "Oak", "Cedar", "Pine", "Elm", "Washington", "Lake", "Hill",
  "Sunset", "River", "Park", "Church", "Mill", "Highland", "Meadow",
];

pub const STREET_SUFFIXES: &[&str] = &[
  "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Way", "Boulevard",
];

pub const CITIES: &[&str] = &[
  "Springfield", "Riverside", "Franklin", "Greenville", "Bristol", "Clinton",
  "Fairview", "Salem", "Madison", "Georgetown", "Arlington", "Ashland",
  "Dover", "Oxford", "Jackson",
];

pub const STATES: &[&str] = &[
  "California", "Texas", "New York", "Florida", "Illinois", "Ohio", "Georgia",
  "Washington", "Oregon", "Colorado", "Arizona", "Massachusetts",
];

pub const COUNTRIES: &[&str] = &[
  "United States", "Canada", "United Kingdom", "Germany", "France", "Spain",
  "Japan", "Brazil", "India", "Australia", "Nigeria", "Mexico",
];

pub const CATCH_ADJECTIVES: &[&str] = &[
  "Adaptive", "Balanced", "Customer-focused", "Distributed", "Ergonomic",
  "Fully-configurable", "Innovative", "Multi-layered", "Proactive",
  "Streamlined", "Synergistic", "Virtual",
];

pub const CATCH_DESCRIPTORS: &[&str] = &[
  "24/7", "asymmetric", "bottom-line", "client-driven", "dynamic", "holistic",
  "intangible", "mission-critical", "real-time", "scalable", "value-added",
];

pub const CATCH_NOUNS: &[&str] = &[
  "architecture", "benchmark", "capability", "database", "framework",
  "hierarchy", "infrastructure", "middleware", "paradigm", "platform",
  "workforce",
];

pub const TICKET_SUBJECTS: &[&str] = &[
  "Unable to log in to the dashboard",
  "Invoice shows the wrong amount",
  "Export to CSV times out",
  "Request for bulk user import",
  "Password reset email never arrives",
  "Mobile app crashes on launch",
  "Charged twice this month",
  "Feature request: dark mode",
  "Webhook deliveries are delayed",
  "Report totals do not match",
  "Cannot upload attachments larger than 5 MB",
  "Need to change the account owner",
  "Search returns stale results",
  "SSO configuration question",
  "Data missing after last sync",
];

pub const TICKET_SENTENCES: &[&str] = &[
  "This started happening after the latest update.",
  "Several people on our team are affected.",
  "We have already cleared the cache and tried another browser.",
  "The issue is blocking our month-end close.",
  "Screenshots are attached for reference.",
  "It happens intermittently, roughly once an hour.",
  "Could you let us know if there is a workaround?",
  "We are on the business plan with priority support.",
  "The same steps worked fine last week.",
  "Please escalate if this needs engineering input.",
  "Our admin confirmed the permissions look correct.",
  "Happy to jump on a call if that helps.",
];
