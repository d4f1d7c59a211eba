//! # 作业参数数据模型
//!
//! - `JobSpec`: 渲染前的完整作业参数（所有默认值已填充）
//! - `JobParams`: 调用方给出的覆盖值，未给出的字段由预设补全
//! - `ClusterConfig`: 集群相关配置（队列名、提交程序）
//!
//! ## 依赖关系
//! - 被 `slurm/` 和 `commands/` 使用

/// 已解析的作业参数
///
/// 构造一次、立即渲染写盘，之后丢弃。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    /// 墙钟时间上限，如 `1-00:00:00`
    pub time: String,

    /// 任务数
    pub tasks: u32,

    /// 每任务 CPU 数
    pub cpus_per_task: u32,

    /// 节点数
    pub nodes: u32,

    /// 标准输出路径，缺省时按默认文件名规则生成
    pub output: Option<String>,

    /// 标准错误路径
    pub error: Option<String>,

    /// 作业数组范围，如 `0-9`
    pub array: Option<String>,

    /// 作业数组并发上限
    pub array_throttle: Option<String>,

    /// 额外指令 (名称, 值)，按给定顺序输出为 `--name=value`
    pub extra: Vec<(String, String)>,
}

impl Default for JobSpec {
    fn default() -> Self {
        JobSpec {
            time: "1-00:00:00".to_string(),
            tasks: 1,
            cpus_per_task: 1,
            nodes: 1,
            output: None,
            error: None,
            array: None,
            array_throttle: None,
            extra: Vec::new(),
        }
    }
}

impl JobSpec {
    /// 是否为作业数组（空字符串视为未设置）
    pub fn is_array(&self) -> bool {
        non_empty(&self.array).is_some()
    }

    pub fn is_multi_node(&self) -> bool {
        self.nodes > 1
    }
}

/// 调用方覆盖值
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobParams {
    pub time: Option<String>,
    pub tasks: Option<u32>,
    pub cpus: Option<u32>,
    pub nodes: Option<u32>,
    pub output: Option<String>,
    pub error: Option<String>,
    pub array: Option<String>,
    pub array_throttle: Option<String>,
    pub gpus: Option<u32>,
    pub mem: Option<String>,
    pub mem_per_gpu: Option<String>,
    pub extra: Vec<(String, String)>,
}

/// 集群配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterConfig {
    /// CPU 作业分区
    pub cpu_queue: String,
    /// GPU 作业分区
    pub gpu_queue: String,
    /// 提交程序
    pub sbatch: String,
}

impl Default for ClusterConfig {
    fn default() -> Self {
        ClusterConfig {
            cpu_queue: "htc-el8".to_string(),
            gpu_queue: "gpu-el8".to_string(),
            sbatch: "sbatch".to_string(),
        }
    }
}

/// 解析 `KEY=VALUE` 形式的参数
pub fn parse_key_value(raw: &str) -> Option<(String, String)> {
    let (key, value) = raw.split_once('=')?;
    let key = key.trim().trim_start_matches("--");
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
