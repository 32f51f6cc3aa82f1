//! 流水线阶段运行器

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

/// 阶段生命周期日志的 target
pub const STAGE_LOG_TARGET: &str = "wine_rater::stage";

/// 流水线阶段
///
/// 每次调用 [`PipelineStage::main`] 都是一次完整、独立的执行，阶段之间不保留状态
#[async_trait]
pub trait PipelineStage: Send + Sync {
    /// 错误类型
    type Error: Debug + Display + Send + Sync + 'static;

    /// 阶段名称
    fn name(&self) -> &str;

    /// 执行阶段
    async fn main(&self) -> Result<(), Self::Error>;
}

/// 运行阶段并记录开始、完成或失败日志
///
/// 失败时记录一次错误日志（`Debug` 格式，含错误链和可用的回溯），然后原样返回错误
pub async fn run_stage<S>(stage: &S) -> Result<(), S::Error>
where
    S: PipelineStage + ?Sized,
{
    let name = stage.name();
    let span = info_span!("stage", stage = %name, run_id = %Uuid::new_v4());

    async move {
        info!(target: STAGE_LOG_TARGET, ">>>>>>> stage {} started <<<<<<<", name);

        match stage.main().await {
            Ok(()) => {
                info!(target: STAGE_LOG_TARGET, ">>>>>>> stage {} complete <<<<<<<", name);
                Ok(())
            }
            Err(e) => {
                error!(target: STAGE_LOG_TARGET, error = %e, "stage {} failed: {:?}", name, e);
                Err(e)
            }
        }
    }
    .instrument(span)
    .await
}
