//! Load-based consumption model: driving resistance -> engine power -> consumption.

use super::ConsumptionType;
use crate::efficiency::calc_efficiency_arr;
use crate::imports::*;
use crate::params::*;
use crate::resistance::DrivingResistance;
use crate::vehicle::Vehicle;

/// Physical consumption model.
///
/// Results of the most recent [PhysicalModel::calculate_consumption] call are kept on the
/// instance for inspection and are never serialized.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct PhysicalModel {
    /// Whether consumption is reported as fuel ($\frac{l}{h}$) or energy ($kW$)
    pub consumption_type: ConsumptionType,
    /// Gravitational acceleration and air density
    pub props: PhysicalProperties,
    /// Driving resistance decomposition of the last calculation, $N$
    #[serde(skip)]
    pub driving_resistance: DrivingResistance,
    /// Drivetrain efficiency of the last calculation
    #[serde(skip)]
    pub efficiency: Array1<f64>,
    /// Engine power of the last calculation, $kW$
    #[serde(skip)]
    pub power: Array1<f64>,
    /// Instantaneous consumption of the last calculation
    #[serde(skip)]
    pub consumption: Array1<f64>,
}

impl PhysicalModel {
    pub fn new(consumption_type: ConsumptionType, props: PhysicalProperties) -> Self {
        Self {
            consumption_type,
            props,
            ..Default::default()
        }
    }

    /// Returns instantaneous consumption, $\frac{l}{h}$ for fuel or $kW$ for energy
    ///
    /// # Arguments
    /// - `speed_kmph`: vehicle speed, $\frac{km}{h}$
    /// - `accel_mps2`: vehicle acceleration, $\frac{m}{s^2}$
    /// - `grade_rad`: road gradient angle, $rad$
    /// - `veh`: vehicle
    /// - `rolling_coef`: rolling resistance coefficient, constant or per sample
    /// - `efficiency`: drivetrain efficiency used verbatim if provided, otherwise
    ///   interpolated from driving resistance between the vehicle's efficiency bounds
    pub fn calculate_consumption(
        &mut self,
        speed_kmph: &Array1<f64>,
        accel_mps2: &Array1<f64>,
        grade_rad: &Array1<f64>,
        veh: &Vehicle,
        rolling_coef: &ScalarOrArray,
        efficiency: Option<&ScalarOrArray>,
    ) -> anyhow::Result<Array1<f64>> {
        ensure_equal_len(&[
            ("speed", speed_kmph.len()),
            ("acceleration", accel_mps2.len()),
            ("gradient_angle", grade_rad.len()),
        ])?;
        let len = speed_kmph.len();
        let calorific_value = match self.consumption_type {
            ConsumptionType::Energy => None,
            ConsumptionType::Fuel => Some(veh.calorific_value_kwh_per_l.with_context(|| {
                format!(
                    "{} vehicles have no calorific value, use consumption type `{}`",
                    veh.fuel_type,
                    ConsumptionType::Energy
                )
            })?),
        };

        let speed_mps = speed_kmph / KMPH_PER_MPS;
        let rolling_coef = rolling_coef.broadcast(len, "rolling_coef")?;
        let driving_resistance = DrivingResistance::new(
            &speed_mps,
            accel_mps2,
            grade_rad,
            &rolling_coef,
            veh,
            &self.props,
        )?;
        let resistance = driving_resistance.total();

        let efficiency = match efficiency {
            Some(eff) => {
                ensure!(
                    eff.all(|e| e > 0.0),
                    "efficiency must be positive, got {eff:?}"
                );
                eff.broadcast(len, "efficiency")?
            }
            None => calc_efficiency_arr(
                &resistance,
                EFF_RES_MIN_N,
                EFF_RES_MAX_N,
                veh.min_efficiency,
                veh.max_efficiency,
            ),
        };

        let mut power = &speed_mps * &resistance / W_PER_KW;
        if !veh.is_electric() {
            power.mapv_inplace(|p| p.max(veh.idle_power_kw));
        }

        let consumption = match calorific_value {
            Some(calorific_value) => &power / &(&efficiency * calorific_value),
            None => &power / &efficiency,
        };
        log::debug!(
            "physical model: {} samples, peak power {:.3} kW, mean consumption {:.4} {}",
            len,
            power.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            consumption.mean().unwrap_or_default(),
            self.consumption_type.rate_unit()
        );

        self.driving_resistance = driving_resistance;
        self.efficiency = efficiency;
        self.power = power;
        self.consumption = consumption.clone();
        Ok(consumption)
    }
}

impl SerdeAPI for PhysicalModel {
    fn init(&mut self) -> anyhow::Result<()> {
        self.props.init()
    }
}
