use crate::auth::JwtConfig;
use crate::pricing::CardPolicy;
use std::path::PathBuf;

/// 存储后端
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseKind {
    /// 嵌入式 SurrealDB (RocksDB)
    Surreal,
    /// 进程内存储 (开发 / 测试)
    Memory,
}

impl DatabaseKind {
    fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "surreal" | "surrealdb" | "rocksdb" => Some(Self::Surreal),
            "memory" | "mem" => Some(Self::Memory),
            _ => None,
        }
    }
}

/// 服务器配置
///
/// # 环境变量
///
/// 所有配置项都可以通过环境变量覆盖：
///
/// | 环境变量 | 默认值 | 说明 |
/// |----------|--------|------|
/// | WORK_DIR | ./data | 工作目录 |
/// | HTTP_PORT | 5517 | HTTP 服务端口 |
/// | DATABASE | surreal | 存储后端 (surreal / memory) |
/// | DATABASE_PATH | $WORK_DIR/database | SurrealDB 数据目录 |
/// | SEED_FILE | - | 启动时导入的 JSON 种子数据 |
/// | ENVIRONMENT | development | 运行环境 |
/// | REJECT_UNKNOWN_CARD_TYPES | false | 拒绝无法识别卡组织的银行卡 |
/// | CORS_ORIGINS | * | 允许的跨域来源 (逗号分隔) |
/// | REQUEST_TIMEOUT_MS | 30000 | 请求超时(毫秒) |
///
/// # 示例
///
/// ```ignore
/// DATABASE=memory HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// 工作目录，存储数据库、日志等文件
    pub work_dir: String,
    /// HTTP API 服务端口
    pub http_port: u16,
    /// 存储后端
    pub database: DatabaseKind,
    /// SurrealDB 数据目录 (None 时使用 work_dir/database)
    pub database_path: Option<String>,
    /// 种子数据文件
    pub seed_file: Option<String>,
    /// JWT 认证配置
    pub jwt: JwtConfig,
    /// 运行环境: development | staging | production
    pub environment: String,
    /// 银行卡校验策略
    pub card_policy: CardPolicy,
    /// 允许的跨域来源，空表示不限制
    pub cors_origins: Vec<String>,
    /// 请求超时时间 (毫秒)
    pub request_timeout_ms: u64,
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// 如果环境变量未设置，使用默认值
    pub fn from_env() -> Self {
        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5517),
            database: std::env::var("DATABASE")
                .ok()
                .and_then(|v| DatabaseKind::parse(&v))
                .unwrap_or(DatabaseKind::Surreal),
            database_path: std::env::var("DATABASE_PATH").ok(),
            seed_file: std::env::var("SEED_FILE").ok().filter(|s| !s.is_empty()),
            jwt: JwtConfig::default(),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            card_policy: CardPolicy {
                reject_unknown: std::env::var("REJECT_UNKNOWN_CARD_TYPES")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(false),
            },
            cors_origins: std::env::var("CORS_ORIGINS")
                .ok()
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
        }
    }

    /// 内存存储 + 固定 JWT 密钥的配置
    ///
    /// 常用于测试场景
    pub fn for_tests(jwt_secret: impl Into<String>) -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            http_port: 0,
            database: DatabaseKind::Memory,
            database_path: None,
            seed_file: None,
            jwt: JwtConfig {
                secret: jwt_secret.into(),
                expiration_minutes: 60,
                issuer: "order-server".to_string(),
                audience: "order-clients".to_string(),
            },
            environment: "test".to_string(),
            card_policy: CardPolicy::default(),
            cors_origins: Vec::new(),
            request_timeout_ms: 30000,
        }
    }

    /// SurrealDB 数据目录
    pub fn database_dir(&self) -> PathBuf {
        match &self.database_path {
            Some(p) => PathBuf::from(p),
            None => PathBuf::from(&self.work_dir).join("database"),
        }
    }

    /// 是否生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 是否开发环境
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "*")
        .map(str::to_string)
        .collect()
}
