/// Text the editor starts with: a two-series line chart.
pub const EXAMPLE_OPTION: &str = r"option = {
  title: {
    text: 'Weekly traffic',
  },
  xAxis: {
    type: 'category',
    data: ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun'],
  },
  yAxis: {
    type: 'value',
  },
  legend: {
    data: ['Email', 'Union Ads'],
  },
  series: [
    {
      name: 'Email',
      type: 'line',
      data: [120, 132, 101, 134, 90, 230, 210],
    },
    {
      name: 'Union Ads',
      type: 'line',
      data: [220, 182, 191, 234, 290, 330, 310],
    },
  ],
};
";
